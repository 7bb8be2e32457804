use std::collections::HashMap as StdHashMap;
use std::fmt::{self, Display, Formatter};
use std::hash::BuildHasher;

/// A stored variable value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A number, rendered with [`format_number`](fn.format_number.html)
    Number(f64),
    /// A piece of text, rendered verbatim
    Text(String),
    /// Any other value, already rendered for display
    Other(String),
}

impl Value {
    /// Get `Some(number)` if the value is a number. Else, get `None`
    pub fn as_number(&self) -> Option<f64> {
        if let Self::Number(number) = *self {
            Some(number)
        } else {
            None
        }
    }

    /// Name of the kind of value, for listings
    pub fn kind(&self) -> &'static str {
        match *self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Other(_) => "other",
        }
    }
}

impl Display for Value {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Number(number) => fmt.write_str(&format_number(number)),
            Self::Text(ref text) | Self::Other(ref text) => fmt.write_str(text),
        }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

/// Format `number` with the shortest representation that reads back to the
/// same value. Scientific notation is used only when the decimal exponent is
/// below -4 or at least 21.
///
/// # Examples
///
/// ```
/// # use reckon::format_number;
/// assert_eq!(format_number(10.0), "10");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(0.0001), "0.0001");
/// assert_eq!(format_number(0.00001), "1e-5");
/// assert_eq!(format_number(1.5e21), "1.5e21");
/// ```
pub fn format_number(number: f64) -> String {
    if !number.is_finite() || number == 0.0 {
        return number.to_string();
    }
    let scientific = format!("{:e}", number);
    let exponent = scientific
        .rsplit('e')
        .next()
        .and_then(|exponent| exponent.parse::<i32>().ok())
        .unwrap_or_default();
    if exponent < -4 || exponent >= 21 {
        scientific
    } else {
        number.to_string()
    }
}

/// Read access to named variables
pub trait Lookup {
    /// Get the value of the variable `name`, if it exists
    fn get(&self, name: &str) -> Option<&Value>;
}

impl<S: BuildHasher> Lookup for StdHashMap<String, Value, S> {
    fn get(&self, name: &str) -> Option<&Value> {
        StdHashMap::get(self, name)
    }
}

impl<S: BuildHasher> Lookup for hashbrown::HashMap<String, Value, S> {
    fn get(&self, name: &str) -> Option<&Value> {
        hashbrown::HashMap::get(self, name)
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn get(&self, name: &str) -> Option<&Value> {
        (**self).get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0 => "0" ; "zero")]
    #[test_case(15.0 => "15" ; "integer")]
    #[test_case(-2.5 => "-2.5" ; "negative")]
    #[test_case(123_456.789 => "123456.789" ; "no trailing zeros")]
    #[test_case(1e20 => "100000000000000000000" ; "large but plain")]
    #[test_case(1e21 => "1e21" ; "large")]
    #[test_case(0.000_123 => "0.000123" ; "small but plain")]
    #[test_case(1e-19 => "1e-19" ; "very small")]
    #[test_case(f64::INFINITY => "inf" ; "infinity")]
    fn format(number: f64) -> String {
        format_number(number)
    }

    #[test]
    fn round_trip() {
        let numbers = [
            10.0,
            0.1 + 0.2,
            1.0 / 3.0,
            -42.125,
            1e-7 * 1e-12,
            6.02214076e23,
            2.0_f64.powi(60),
            f64::MIN_POSITIVE,
        ];
        for &number in &numbers {
            let parsed: f64 = format_number(number).parse().unwrap();
            assert!(
                ((parsed - number) / number).abs() <= 1e-9,
                "{} read back as {}",
                number,
                parsed
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::Other("[1 2]".into()).to_string(), "[1 2]");
        assert_eq!(Value::from(3.0).as_number(), Some(3.0));
        assert_eq!(Value::from(String::from("3")).as_number(), None);
    }

    #[test]
    fn lookups() {
        let mut std_map: StdHashMap<String, Value> = StdHashMap::new();
        std_map.insert("x".into(), Value::Number(1.0));
        let mut map: hashbrown::HashMap<String, Value> = hashbrown::HashMap::new();
        map.insert("x".into(), Value::Number(2.0));

        assert_eq!(Lookup::get(&std_map, "x"), Some(&Value::Number(1.0)));
        assert_eq!(Lookup::get(&map, "x"), Some(&Value::Number(2.0)));
        assert_eq!(Lookup::get(&map, "X"), None);
    }
}
