//! Semantic enumerations and their wire values.
//!
//! Each enum maps both ways between a wire integer (or WPF name) and a
//! semantic tag. Values outside the known set decode to `Other` and are
//! written back unchanged. Integer tags compare by wire value, so
//! `Other(n)` for a known `n` equals the named variant.

macro_rules! wire_int_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A wire value outside the known set.
            Other(i32),
        }

        impl $name {
            /// Map a wire integer to its tag.
            pub const fn from_wire(value: i32) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other),
                }
            }

            /// The wire integer for this tag.
            pub const fn to_wire(self) -> i32 {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value,
                }
            }

            /// The named variant for this tag's wire value, if there is one.
            #[must_use]
            pub const fn normalized(self) -> Self {
                Self::from_wire(self.to_wire())
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.to_wire() == other.to_wire()
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.to_wire().hash(state);
            }
        }
    };
}

wire_int_enum! {
    /// What a cue holds.
    pub enum CueType {
        /// An empty cue
        #[default]
        Blank = 0,
        /// Song lyrics split into stanzas
        Lyric = 1,
        /// A bible passage
        Bible = 2,
        /// Free text
        Text = 3,
        /// A comment marker, never shown
        Comment = 4,
    }
}

wire_int_enum! {
    /// Role of a text item.
    pub enum TextItemType {
        /// A plain text box
        #[default]
        Basic = 0,
        /// Lyric text generated from a lyric cue
        Lyric = 1,
        /// Verse text generated from a bible cue
        Bible = 2,
        /// Text generated from a text cue
        TextCue = 6,
    }
}

wire_int_enum! {
    /// `System.Windows.TextAlignment`.
    pub enum TextAlignment {
        /// Left aligned
        Left = 0,
        /// Right aligned
        Right = 1,
        /// Centered
        #[default]
        Center = 2,
        /// Justified
        Justify = 3,
    }
}

wire_int_enum! {
    /// `System.Windows.VerticalAlignment`.
    pub enum VerticalAlignment {
        /// Top aligned
        Top = 0,
        /// Centered
        #[default]
        Center = 1,
        /// Bottom aligned
        Bottom = 2,
        /// Stretched to fill
        Stretch = 3,
    }
}

/// `System.Windows.FontStyle`, written by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Upright
    #[default]
    Normal,
    /// Italic
    Italic,
    /// Slanted
    Oblique,
    /// A name outside the known set
    Other(String),
}

impl FontStyle {
    /// Map a style name, ignoring case.
    pub fn from_wire(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Self::Normal,
            "italic" => Self::Italic,
            "oblique" => Self::Oblique,
            _ => Self::Other(name.to_owned()),
        }
    }

    /// The WPF name.
    pub fn to_wire(&self) -> &str {
        match self {
            Self::Normal => "Normal",
            Self::Italic => "Italic",
            Self::Oblique => "Oblique",
            Self::Other(name) => name,
        }
    }
}

/// `System.Windows.FontWeight`, written by name.
///
/// WPF keeps several aliases for the same weight (`Normal`/`Regular`,
/// `Black`/`Heavy`); the name read is the name written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// 100
    Thin,
    /// 200
    ExtraLight,
    /// 200
    UltraLight,
    /// 300
    Light,
    /// 400
    #[default]
    Normal,
    /// 400
    Regular,
    /// 500
    Medium,
    /// 600
    DemiBold,
    /// 600
    SemiBold,
    /// 700
    Bold,
    /// 800
    ExtraBold,
    /// 800
    UltraBold,
    /// 900
    Black,
    /// 900
    Heavy,
    /// 950
    ExtraBlack,
    /// 950
    UltraBlack,
    /// A name outside the known set
    Other(String),
}

impl FontWeight {
    const NAMED: [(Self, &'static str); 16] = [
        (Self::Thin, "Thin"),
        (Self::ExtraLight, "ExtraLight"),
        (Self::UltraLight, "UltraLight"),
        (Self::Light, "Light"),
        (Self::Normal, "Normal"),
        (Self::Regular, "Regular"),
        (Self::Medium, "Medium"),
        (Self::DemiBold, "DemiBold"),
        (Self::SemiBold, "SemiBold"),
        (Self::Bold, "Bold"),
        (Self::ExtraBold, "ExtraBold"),
        (Self::UltraBold, "UltraBold"),
        (Self::Black, "Black"),
        (Self::Heavy, "Heavy"),
        (Self::ExtraBlack, "ExtraBlack"),
        (Self::UltraBlack, "UltraBlack"),
    ];

    /// Map a weight name, ignoring case.
    pub fn from_wire(name: &str) -> Self {
        Self::NAMED
            .iter()
            .find(|(_, wire)| wire.eq_ignore_ascii_case(name))
            .map_or_else(|| Self::Other(name.to_owned()), |(weight, _)| weight.clone())
    }

    /// The WPF name.
    pub fn to_wire(&self) -> &str {
        match self {
            Self::Other(name) => name,
            known => Self::NAMED
                .iter()
                .find(|(weight, _)| weight == known)
                .map_or("Normal", |(_, wire)| *wire),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_other_with_known_value_is_the_named_tag() {
        assert_eq!(CueType::Other(1), CueType::Lyric);
        assert!(matches!(CueType::Other(1).normalized(), CueType::Lyric));
        assert!(matches!(CueType::Other(9).normalized(), CueType::Other(9)));
        assert_eq!(CueType::from_wire(CueType::Other(2).to_wire()), CueType::Other(2));

        let tags: std::collections::HashSet<TextItemType> =
            [TextItemType::Other(6), TextItemType::TextCue].into_iter().collect();
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_cue_type_bijection() {
        for (tag, wire) in [
            (CueType::Blank, 0),
            (CueType::Lyric, 1),
            (CueType::Bible, 2),
            (CueType::Text, 3),
            (CueType::Comment, 4),
        ] {
            assert_eq!(CueType::from_wire(wire), tag);
            assert_eq!(tag.to_wire(), wire);
        }
    }

    #[test]
    fn test_text_item_type_skips_unused_values() {
        assert_eq!(TextItemType::from_wire(6), TextItemType::TextCue);
        assert_eq!(TextItemType::from_wire(4), TextItemType::Other(4));
        assert_eq!(TextItemType::Other(4).to_wire(), 4);
    }

    #[test]
    fn test_alignment_defaults() {
        assert_eq!(TextAlignment::default().to_wire(), 2);
        assert_eq!(VerticalAlignment::default().to_wire(), 1);
        assert_eq!(VerticalAlignment::from_wire(3), VerticalAlignment::Stretch);
    }

    #[test]
    fn test_font_style_is_case_insensitive() {
        assert_eq!(FontStyle::from_wire("italic"), FontStyle::Italic);
        assert_eq!(FontStyle::from_wire("OBLIQUE").to_wire(), "Oblique");
        assert_eq!(FontStyle::from_wire("Slanted"), FontStyle::Other("Slanted".into()));
    }

    #[test]
    fn test_font_weight_names() {
        assert_eq!(FontWeight::from_wire("semibold"), FontWeight::SemiBold);
        assert_eq!(FontWeight::from_wire("ExtraBlack").to_wire(), "ExtraBlack");
        assert_eq!(FontWeight::Regular.to_wire(), "Regular");
        assert_eq!(FontWeight::from_wire("950"), FontWeight::Other("950".into()));
        for (weight, wire) in &FontWeight::NAMED {
            assert_eq!(&FontWeight::from_wire(wire), weight);
            assert_eq!(weight.to_wire(), *wire);
        }
    }
}
