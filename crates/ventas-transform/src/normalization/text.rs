//! Free-text cleanup and display casing.

/// Trims, lowercases and collapses whitespace runs to a single space.
pub fn sanitize_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Title-cases a value for display.
///
/// Every letter that follows a non-letter is uppercased and every other
/// letter lowercased, so `monitor 24 pulgadas` becomes `Monitor 24 Pulgadas`
/// and `o'neil` becomes `O'Neil`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  Laptop   Model\tX "), "laptop model x");
        assert_eq!(sanitize_text("MÁLAGA"), "málaga");
        assert_eq!(sanitize_text("   "), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("laptop modelo x"), "Laptop Modelo X");
        assert_eq!(title_case("teclado inalámbrico"), "Teclado Inalámbrico");
        assert_eq!(title_case("monitor 24 pulgadas"), "Monitor 24 Pulgadas");
        assert_eq!(title_case("sin notas"), "Sin Notas");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("ANA lópez"), "Ana López");
    }
}
