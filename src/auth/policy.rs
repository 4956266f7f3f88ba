use crate::api::authorizer::{PolicyDocument, Statement, INVOKE_ACTION};
use crate::types::Effect;

impl PolicyDocument {
    /// Whether this policy lets the caller invoke `method_arn`.
    ///
    /// A matching Deny always wins; otherwise a matching Allow is required.
    pub fn allows(&self, method_arn: &str) -> bool {
        let matching = |effect: Effect| {
            self.statement
                .iter()
                .filter(|s| s.effect == effect)
                .any(|s| s.covers(method_arn))
        };
        !matching(Effect::Deny) && matching(Effect::Allow)
    }
}

impl Statement {
    fn covers(&self, method_arn: &str) -> bool {
        let action_matches = self.action == INVOKE_ACTION
            || self.action == "execute-api:*"
            || self.action == "*";
        action_matches && wildcard_match(&self.resource, method_arn)
    }
}

/// Glob match supporting `*` (any run, including empty) and `?` (one char).
///
/// Every other character is literal. Glob libraries read `[...]` as a
/// character class, which ARN resources must not get.
fn wildcard_match(pattern: &str, value: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let v: Vec<char> = value.chars().collect();
    let (mut pi, mut vi) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while vi < v.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == v[vi]) {
            pi += 1;
            vi += 1;
        } else if pi < p.len() && p[pi] == '*' {
            backtrack = Some((pi, vi));
            pi += 1;
        } else if let Some((star, matched)) = backtrack {
            pi = star + 1;
            vi = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}
