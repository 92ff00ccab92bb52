use crate::{
    model::{Inputs, NodeDescriptor, Value},
    runtime::{EvalContext, NodeBehavior, Outcome},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterEquals,
    LessEquals,
}

impl Operator {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "equals" => Some(Self::Equals),
            "not_equals" => Some(Self::NotEquals),
            "greater" => Some(Self::Greater),
            "less" => Some(Self::Less),
            "greater_equals" => Some(Self::GreaterEquals),
            "less_equals" => Some(Self::LessEquals),
            _ => None,
        }
    }

    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Equals => lhs == rhs,
            Self::NotEquals => lhs != rhs,
            Self::Greater => lhs > rhs,
            Self::Less => lhs < rhs,
            Self::GreaterEquals => lhs >= rhs,
            Self::LessEquals => lhs <= rhs,
        }
    }
}

/// Numeric comparison with exclusive branch outputs: exactly one of the
/// `true`/`false` outputs carries a value, so downstream connections keyed
/// to the other branch do not fire.
pub struct ConditionBehavior;

impl NodeBehavior for ConditionBehavior {
    fn evaluate(&self, _ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        let Some(input) = inputs.get("input") else {
            return Outcome::silent();
        };
        if !input.is_truthy() {
            return Outcome::silent();
        }

        let operator = match node.field_str("operator") {
            Some(tag) => match Operator::from_tag(tag) {
                Some(op) => op,
                None => {
                    log::warn!("condition node {} has unknown operator {tag:?}", node.id);
                    Operator::Equals
                }
            },
            None => Operator::Equals,
        };
        let rhs = node.field_f64("value").unwrap_or(0.0);

        let branch = if operator.compare(input.as_number(), rhs) {
            "true"
        } else {
            "false"
        };
        Outcome::single(branch, Value::Bool(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_operators_compare() {
        assert!(Operator::Equals.compare(2.0, 2.0));
        assert!(Operator::NotEquals.compare(2.0, 3.0));
        assert!(Operator::Greater.compare(3.0, 2.0));
        assert!(Operator::Less.compare(2.0, 3.0));
        assert!(Operator::GreaterEquals.compare(2.0, 2.0));
        assert!(Operator::LessEquals.compare(1.0, 2.0));
        assert_eq!(Operator::from_tag("between"), None);
    }
}
