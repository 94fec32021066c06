use nom::{
    bytes::complete::take_while_m_n,
    combinator::map_res,
    sequence::tuple,
    IResult, Parser,
};

/// RGBA colour using the SubStation transparency convention, where an alpha of
/// 0 is fully opaque and 255 is fully transparent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
    /// SubStation alpha (0 = opaque, 255 = transparent)
    pub alpha: u8,
}

impl Rgba {
    /// Create a fully opaque colour
    #[must_use]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0,
        }
    }

    /// Convert to the CineCanvas colour attribute format: `RRGGBBAA` in
    /// uppercase hex, where the alpha channel is complemented so that `FF`
    /// means opaque
    #[must_use]
    pub fn as_cinecanvas(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}{:02X}",
            self.red,
            self.green,
            self.blue,
            0xFF - self.alpha
        )
    }

    /// Parse a CineCanvas colour attribute.
    ///
    /// Strings shorter than six characters, or containing non-hex characters,
    /// fall back to opaque white. Strings without an alpha pair are opaque.
    #[must_use]
    pub fn from_cinecanvas(value: &str) -> Self {
        let Ok((rest, (red, green, blue))) = parse_hex_triple(value) else {
            return Rgba::opaque(0xFF, 0xFF, 0xFF);
        };

        let alpha = match parse_hex_pair(rest) {
            Ok((_, complement)) => 0xFF - complement,
            Err(_) => 0,
        };

        Rgba {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::opaque(0xFF, 0xFF, 0xFF)
    }
}

fn parse_hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |pair| u8::from_str_radix(pair, 16),
    )
    .parse(input)
}

fn parse_hex_triple(input: &str) -> IResult<&str, (u8, u8, u8)> {
    tuple((parse_hex_pair, parse_hex_pair, parse_hex_pair)).parse(input)
}
