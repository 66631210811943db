use std::fmt;
use std::str::FromStr;

/// The language an expression is translated into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Python,
    Java,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Target::Python),
            "java" => Ok(Target::Java),
            other => Err(format!("unknown target `{other}` (expected `python` or `java`)")),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Python => "python",
            Target::Java => "java",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_targets() {
        assert_eq!("python".parse::<Target>().unwrap(), Target::Python);
        assert_eq!("Java".parse::<Target>().unwrap(), Target::Java);
    }

    #[test]
    fn rejects_unknown_target() {
        assert!("ruby".parse::<Target>().is_err());
    }
}
