//! The `compose!` macro for composing [`Function`](crate::value::Function) values.

/// Composes function values from right to left.
///
/// `compose!(f, g, h)` calls `h` with the original receiver and arguments,
/// then `g` with that result, then `f`. Each argument goes through
/// `Function::from`, so owned functions are moved in; pass a clone to keep
/// one.
///
/// # Syntax
///
/// - `compose!(f)` - Returns `f` unchanged
/// - `compose!(f, g)` - `f(g(args..))`
/// - `compose!(f, g, h, ...)` - Composes any number of functions
///
/// # Examples
///
/// ```
/// use lowbar::compose;
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let add_one = Function::unary(|x| Value::from(x.to_number() + 1.0));
/// let double = Function::unary(|x| Value::from(x.to_number() * 2.0));
///
/// let composed = compose!(add_one, double);
/// assert_eq!(composed.invoke(&[Value::from(5)]).unwrap(), Value::from(11));
/// ```
#[macro_export]
macro_rules! compose {
    ($function:expr $(,)?) => {
        $crate::value::Function::from($function)
    };
    ($outer_function:expr, $($inner_functions:expr),+ $(,)?) => {
        $crate::function::compose(&[
            $crate::value::Function::from($outer_function),
            $($crate::value::Function::from($inner_functions)),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use crate::Value;
    use crate::value::Function;
    use rstest::rstest;

    fn append(suffix: &'static str) -> Function {
        Function::unary(move |value| Value::from(format!("{value}{suffix}")))
    }

    #[rstest]
    fn test_single_function_is_unchanged() {
        let function = append("a");
        let composed = compose!(function.clone());
        assert!(composed.ptr_eq(&function));
    }

    #[rstest]
    fn test_order_is_right_to_left() {
        let composed = compose!(append("f"), append("g"), append("h"));
        assert_eq!(composed.invoke(&[Value::from(">")]).unwrap(), Value::from(">hgf"));
    }

    #[rstest]
    fn test_associativity() {
        let left = compose!(append("f"), compose!(append("g"), append("h")));
        let right = compose!(compose!(append("f"), append("g")), append("h"));
        let input = [Value::from("x")];
        assert_eq!(left.invoke(&input).unwrap(), right.invoke(&input).unwrap());
    }
}
