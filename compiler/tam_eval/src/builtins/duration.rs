//! The `duration` module.

use super::{check_arity, finish, BuiltinRegistry};
use crate::errors::{expected_type, invalid_duration, EvalResult};
use crate::object::{duration, Module, Object};

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register_module(
        Module::new("duration").function("parse", |_, args| finish(parse(args))),
    );
}

/// `duration.parse("1h30m")`
fn parse(args: &[Object]) -> EvalResult {
    check_arity(args, 1)?;
    let Object::String(text) = &args[0] else {
        return Err(expected_type("duration.parse", "a string", &args[0]));
    };
    duration::parse(text)
        .map(Object::Duration)
        .map_err(|_| invalid_duration(text))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_into_duration_objects() {
        let value = parse(&[Object::string("1h30m")]).unwrap();
        assert_eq!(value.inspect(), "duration(1h30m0s)");
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&[Object::string("soon")]).unwrap_err().message(),
            "value error: invalid duration \"soon\""
        );
        assert_eq!(
            parse(&[Object::Integer(5)]).unwrap_err().message(),
            "type error: duration.parse expected a string (INTEGER given)"
        );
        assert_eq!(
            parse(&[Object::string("9223372036854775808ns9223372036854775808ns")])
                .unwrap_err()
                .message(),
            "value error: invalid duration \"9223372036854775808ns9223372036854775808ns\""
        );
        assert_eq!(
            parse(&[]).unwrap_err().message(),
            "wrong number of arguments. got=0, want=1"
        );
    }
}
