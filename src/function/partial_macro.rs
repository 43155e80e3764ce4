//! The `partial!` macro for partial application of [`Function`](crate::value::Function) values.

/// Partially applies arguments to a function value.
///
/// Use `__` (double underscore) as a placeholder for arguments supplied at
/// call time. Every other argument goes through `Value::from`. Call-time
/// arguments left after filling the placeholders are appended.
///
/// **Important**: Do NOT import `lowbar::function::__`. The `__` is matched as
/// a literal token by the macro.
///
/// # Syntax
///
/// - `partial!(f, value)` creates `|rest..| f(value, rest..)`
/// - `partial!(f, __, value)` creates `|a, rest..| f(a, value, rest..)`
/// - `partial!(f)` forwards every argument unchanged
///
/// # Examples
///
/// ```
/// use lowbar::partial;
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let subtract = Function::binary(|a, b| Value::from(a.to_number() - b.to_number()));
///
/// let sub_from20 = partial!(subtract, 20);
/// assert_eq!(sub_from20.invoke(&[Value::from(5)]).unwrap(), Value::from(15));
///
/// let minus5 = partial!(subtract, __, 5);
/// assert_eq!(minus5.invoke(&[Value::from(20)]).unwrap(), Value::from(15));
/// ```
#[macro_export]
macro_rules! partial {
    (@slots [$($slots:expr),*]) => {
        ::std::vec![$($slots),*]
    };
    (@slots [$($slots:expr),*] __ $(, $($rest:tt)*)?) => {
        $crate::partial!(@slots [$($slots,)* $crate::function::Slot::Placeholder] $($($rest)*)?)
    };
    (@slots [$($slots:expr),*] $argument:expr $(, $($rest:tt)*)?) => {
        $crate::partial!(
            @slots [$($slots,)* $crate::function::Slot::Bound($crate::Value::from($argument))]
            $($($rest)*)?
        )
    };
    ($function:expr $(, $($arguments:tt)*)?) => {
        $crate::function::partial(&$function, $crate::partial!(@slots [] $($($arguments)*)?))
    };
}
