//! Action compatibility constraints.

/// Which state/action combinations an action may activate under.
///
/// Evaluated identically on the fresh-selection and self-repeat paths: a
/// repeat that is no longer compatible does not restart.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compatibility {
    /// No constraint.
    Always,

    /// Current state must be one of these.
    States(Vec<String>),

    /// Current action must be one of these.
    Actions(Vec<String>),

    /// Both constraints at once.
    Both { states: Vec<String>, actions: Vec<String> },
}

impl Compatibility {
    /// `true` when the current state/action pair satisfies the constraint.
    ///
    /// A named constraint with no current state (or action) fails — "no
    /// state" never matches a state list.
    pub fn permits(&self, state: Option<&str>, action: Option<&str>) -> bool {
        fn listed(list: &[String], current: Option<&str>) -> bool {
            current.is_some_and(|name| list.iter().any(|entry| entry == name))
        }
        match self {
            Compatibility::Always => true,
            Compatibility::States(states) => listed(states, state),
            Compatibility::Actions(actions) => listed(actions, action),
            Compatibility::Both { states, actions } => {
                listed(states, state) && listed(actions, action)
            }
        }
    }
}

impl Default for Compatibility {
    fn default() -> Self {
        Compatibility::Always
    }
}
