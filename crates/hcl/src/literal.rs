//! Raw HCL expressions.

use crate::ident::sanitize;
use std::fmt;

/// An HCL expression that is written verbatim, without quoting.
///
/// Literals carry references between resources (`aws_vpc.main.id`) and
/// function calls (`file("${path.module}/data/user_data")`) that cannot be
/// expressed as plain values.
///
/// # Example
///
/// ```rust
/// use tfgen_hcl::Literal;
///
/// let vpc = Literal::property("aws_vpc", "main.example.com", "id");
/// assert_eq!(vpc.as_str(), "aws_vpc.main_example_com.id");
///
/// let data = Literal::file("data/aws_launch_template_nodes_user_data", true);
/// assert_eq!(
///     data.as_str(),
///     "filebase64(\"${path.module}/data/aws_launch_template_nodes_user_data\")"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(String);

impl Literal {
    /// Wrap expression text as-is.
    #[must_use]
    pub fn raw(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// A reference to an attribute of another resource.
    ///
    /// The resource name is sanitized the same way resource blocks are, so the
    /// reference resolves against the emitted block.
    #[must_use]
    pub fn property(resource_type: &str, resource_name: &str, prop: &str) -> Self {
        Self(format!("{resource_type}.{}.{prop}", sanitize(resource_name)))
    }

    /// A function call with literal arguments.
    #[must_use]
    pub fn function(name: &str, args: impl IntoIterator<Item = Self>) -> Self {
        let args: Vec<String> = args.into_iter().map(|a| a.0).collect();
        Self(format!("{name}({})", args.join(", ")))
    }

    /// A `file()` or `filebase64()` call reading `path` relative to the module.
    ///
    /// `path` is placed inside a quoted template as-is, so it must not contain
    /// quotes or template markers; data file paths are built from sanitized
    /// components.
    #[must_use]
    pub fn file(path: &str, base64: bool) -> Self {
        let function = if base64 { "filebase64" } else { "file" };
        let arg = Self(format!("\"${{path.module}}/{path}\""));
        Self::function(function, [arg])
    }

    /// The expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the literal and return the expression text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_sanitizes_name() {
        let literal = Literal::property("aws_subnet", "us-east-1a.example.com", "id");
        assert_eq!(literal.as_str(), "aws_subnet.us-east-1a_example_com.id");
    }

    #[test]
    fn test_function() {
        let literal = Literal::function(
            "cidrsubnet",
            [
                Literal::property("aws_vpc", "main", "cidr_block"),
                Literal::raw("8"),
                Literal::raw("1"),
            ],
        );
        assert_eq!(literal.as_str(), "cidrsubnet(aws_vpc.main.cidr_block, 8, 1)");
    }

    #[test]
    fn test_file_plain() {
        let literal = Literal::file("data/policy.json", false);
        assert_eq!(literal.as_str(), "file(\"${path.module}/data/policy.json\")");
    }

    #[test]
    fn test_display_matches_text() {
        let literal = Literal::raw("var.region");
        assert_eq!(literal.to_string(), "var.region");
    }
}
