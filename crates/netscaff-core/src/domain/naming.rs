//! C# naming rules: identifier checks, casing, pluralisation.
//!
//! Everything here is a pure function over `&str`. The validator uses the
//! predicates; the view model uses the transformations.

/// C# reserved keywords. Contextual keywords (`var`, `async`, ...) are legal
/// identifiers and are not listed.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Why a string is not a usable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierProblem {
    Empty,
    BadStart,
    BadCharacter(char),
    Keyword,
}

impl IdentifierProblem {
    pub fn describe(&self) -> String {
        match self {
            Self::Empty => "must not be empty".into(),
            Self::BadStart => "must start with a letter or '_'".into(),
            Self::BadCharacter(c) => format!("contains invalid character '{c}'"),
            Self::Keyword => "is a reserved C# keyword".into(),
        }
    }
}

/// Check a single identifier segment (no dots).
pub fn check_identifier(s: &str) -> Result<(), IdentifierProblem> {
    let mut chars = s.chars();
    let first = chars.next().ok_or(IdentifierProblem::Empty)?;

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(IdentifierProblem::BadStart);
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(IdentifierProblem::BadCharacter(bad));
    }
    if is_reserved_keyword(s) {
        return Err(IdentifierProblem::Keyword);
    }
    Ok(())
}

/// Check a dotted name such as `Acme.Shop.Domain`.
pub fn check_dotted_name(s: &str) -> Result<(), IdentifierProblem> {
    if s.is_empty() {
        return Err(IdentifierProblem::Empty);
    }
    s.split('.').try_for_each(check_identifier)
}

pub fn is_reserved_keyword(s: &str) -> bool {
    RESERVED_KEYWORDS.contains(&s)
}

/// `OrderLine` → `orderLine`.
pub fn to_camel_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// `orderLine` → `OrderLine`.
pub fn to_pascal_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// English plural of an entity name.
///
/// ## Rules
///
/// | Ending | Example | Result |
/// |--------|---------|--------|
/// | consonant + `y` | `Category` | `Categories` |
/// | vowel + `y` | `Day` | `Days` |
/// | `s`, `x`, `z`, `ch`, `sh` | `Box`, `Batch` | `Boxes`, `Batches` |
/// | anything else | `Product` | `Products` |
pub fn pluralize(s: &str) -> String {
    let lower = s.to_ascii_lowercase();

    if let Some(stem) = s.strip_suffix('y').or_else(|| s.strip_suffix('Y')) {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{s}es");
    }

    format!("{s}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_accept_csharp_names() {
        assert!(check_identifier("Product").is_ok());
        assert!(check_identifier("_cache").is_ok());
        assert!(check_identifier("Order2").is_ok());
    }

    #[test]
    fn identifiers_reject_bad_input() {
        assert_eq!(check_identifier(""), Err(IdentifierProblem::Empty));
        assert_eq!(check_identifier("2Fast"), Err(IdentifierProblem::BadStart));
        assert_eq!(
            check_identifier("Order-Line"),
            Err(IdentifierProblem::BadCharacter('-'))
        );
        assert_eq!(check_identifier("class"), Err(IdentifierProblem::Keyword));
    }

    #[test]
    fn dotted_names_check_every_segment() {
        assert!(check_dotted_name("Acme.Shop").is_ok());
        assert!(check_dotted_name("Acme..Shop").is_err());
        assert!(check_dotted_name("Acme.namespace").is_err());
        assert!(check_dotted_name("").is_err());
    }

    #[test]
    fn casing() {
        assert_eq!(to_camel_case("OrderLine"), "orderLine");
        assert_eq!(to_pascal_case("orderLine"), "OrderLine");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn pluralize_follows_english_rules() {
        assert_eq!(pluralize("Product"), "Products");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Batch"), "Batches");
        assert_eq!(pluralize("Address"), "Addresses");
    }
}
