/// Builds a [`Value`](crate::Value) tree from a literal.
///
/// Tables are written either TOML style (`{ key = value }`) or JSON style
/// (`{ "key": value }`), and keep the written key order. Keys may be bare
/// identifiers or string literals. Lists become arrays and every other
/// token goes through `Value::from`, so wrap multi-token values such as
/// `Hex(255)` or a negative number in parentheses.
///
/// ```rust
/// use serde_toml_tree::{toml_value, Datetime, Hex};
///
/// let released: Datetime = "1979-05-27".parse().unwrap();
/// let server = toml_value!({
///     host = "localhost",
///     ports = [80, 443],
///     mask = (Hex(255)),
///     released = released,
///     "tls settings" = { enabled = true }
/// });
/// assert_eq!(server.get("host").and_then(|v| v.as_str()), Some("localhost"));
/// assert!(server.get("released").map_or(false, |v| v.is_datetime()));
/// ```
#[macro_export]
macro_rules! toml_value {
    (@key $key:ident) => {
        stringify!($key).to_string()
    };

    (@key $key:literal) => {
        ($key).to_string()
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml_value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:tt = $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($crate::toml_value!(@key $key), $crate::toml_value!($value));
        )*
        $crate::Value::Table(table)
    }};

    ({ $($key:tt : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($crate::toml_value!(@key $key), $crate::toml_value!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
