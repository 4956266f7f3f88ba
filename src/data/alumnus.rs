use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

/// A single alumnus profile. Field order here is the order fields serialize in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alumnus {
    pub id: u32,
    pub uname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
}

impl Alumnus {
    fn new(id: u32, uname: &str, first_name: &str, last_name: &str, email: &str, gender: &str) -> Self {
        Self {
            id,
            uname: uname.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            gender: gender.to_string(),
        }
    }

    /// Value of a named field, or `None` if the record has no such field
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id)),
            "uname" => Some(Value::from(self.uname.as_str())),
            "first_name" => Some(Value::from(self.first_name.as_str())),
            "last_name" => Some(Value::from(self.last_name.as_str())),
            "email" => Some(Value::from(self.email.as_str())),
            "gender" => Some(Value::from(self.gender.as_str())),
            _ => None,
        }
    }
}

// Mock data standing in for a database table; "uname" is assumed unique.
static ALUMNI: Lazy<Vec<Alumnus>> = Lazy::new(|| {
    vec![
        Alumnus::new(1, "johndoe", "John", "Doe", "johndoe@example.com", "male"),
        Alumnus::new(2, "janedoe", "Jane", "Doe", "janedoe@example.com", "Female"),
        Alumnus::new(3, "mds", "Matt", "Smith", "mds@example.com", "Male"),
        Alumnus::new(4, "bobsmith", "Bob", "Smith", "bob@example.com", "Male"),
    ]
});

/// The fixed record set, in lookup order
pub fn alumni() -> &'static [Alumnus] {
    &ALUMNI
}

/// First record whose username equals `uname`
pub fn find_by_uname<'a>(uname: &str, source: &'a [Alumnus]) -> Option<&'a Alumnus> {
    source.iter().find(|alum| alum.uname == uname)
}
