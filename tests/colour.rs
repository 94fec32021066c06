use cinecanvas::Rgba;

#[test]
fn opaque_colours_format_with_full_alpha() {
    assert_eq!(Rgba::opaque(0xFF, 0xFF, 0xFF).as_cinecanvas(), "FFFFFFFF");
    assert_eq!(Rgba::opaque(0, 0, 0).as_cinecanvas(), "000000FF");
    assert_eq!(Rgba::opaque(0x12, 0xAB, 0x34).as_cinecanvas(), "12AB34FF");
}

#[test]
fn alpha_channel_is_complemented() {
    let translucent = Rgba {
        red: 0x10,
        green: 0x20,
        blue: 0x30,
        alpha: 0x40,
    };
    assert_eq!(translucent.as_cinecanvas(), "102030BF");

    let transparent = Rgba {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0xFF,
    };
    assert_eq!(transparent.as_cinecanvas(), "00000000");
}

#[test]
fn parse_round_trips_every_channel() {
    for colour in [
        Rgba::opaque(0xFF, 0xFF, 0xFF),
        Rgba::opaque(0, 0, 0),
        Rgba {
            red: 0x12,
            green: 0x34,
            blue: 0x56,
            alpha: 0x78,
        },
    ] {
        assert_eq!(Rgba::from_cinecanvas(&colour.as_cinecanvas()), colour);
    }
}

#[test]
fn short_strings_fall_back_to_opaque_white() {
    assert_eq!(Rgba::from_cinecanvas(""), Rgba::opaque(0xFF, 0xFF, 0xFF));
    assert_eq!(Rgba::from_cinecanvas("AB"), Rgba::opaque(0xFF, 0xFF, 0xFF));
    assert_eq!(
        Rgba::from_cinecanvas("ABCDE"),
        Rgba::opaque(0xFF, 0xFF, 0xFF)
    );
}

#[test]
fn non_hex_strings_fall_back_to_opaque_white() {
    assert_eq!(
        Rgba::from_cinecanvas("GGHHII"),
        Rgba::opaque(0xFF, 0xFF, 0xFF)
    );
    assert_eq!(
        Rgba::from_cinecanvas("nonsense"),
        Rgba::opaque(0xFF, 0xFF, 0xFF)
    );
}

#[test]
fn six_character_strings_are_opaque() {
    assert_eq!(Rgba::from_cinecanvas("102030"), Rgba::opaque(0x10, 0x20, 0x30));
}

#[test]
fn eight_character_strings_carry_alpha() {
    assert_eq!(
        Rgba::from_cinecanvas("102030BF"),
        Rgba {
            red: 0x10,
            green: 0x20,
            blue: 0x30,
            alpha: 0x40,
        }
    );
}
