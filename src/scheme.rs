use serde::{Serialize, Serializer};
use std::fmt;

/// Named perceptual color schemes a habit can use instead of its flat color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Blues,
    Greens,
    Greys,
    Oranges,
    Purples,
    Reds,
    BuGn,
    BuPu,
    GnBu,
    OrRd,
    PuBu,
    PuBuGn,
    PuRd,
    RdPu,
    YlGnBu,
    YlGn,
    YlOrBr,
    YlOrRd,
    Cividis,
    Viridis,
    Inferno,
    Magma,
    Plasma,
    Warm,
    Cool,
    Cubehelix,
    Turbo,
    BrBG,
    PRGn,
    PiYG,
    PuOr,
    RdBu,
    RdGy,
    RdYlBu,
    RdYlGn,
    Spectral,
    Rainbow,
    Sinebow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeGroup {
    SingleHue,
    MultiHue,
    Diverging,
    Cyclical,
}

impl SchemeGroup {
    pub fn label(self) -> &'static str {
        match self {
            SchemeGroup::SingleHue => "Sequential (single hue)",
            SchemeGroup::MultiHue => "Sequential (multi hue)",
            SchemeGroup::Diverging => "Diverging",
            SchemeGroup::Cyclical => "Cyclical",
        }
    }
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 38] = [
        ColorScheme::Blues,
        ColorScheme::Greens,
        ColorScheme::Greys,
        ColorScheme::Oranges,
        ColorScheme::Purples,
        ColorScheme::Reds,
        ColorScheme::BuGn,
        ColorScheme::BuPu,
        ColorScheme::GnBu,
        ColorScheme::OrRd,
        ColorScheme::PuBu,
        ColorScheme::PuBuGn,
        ColorScheme::PuRd,
        ColorScheme::RdPu,
        ColorScheme::YlGnBu,
        ColorScheme::YlGn,
        ColorScheme::YlOrBr,
        ColorScheme::YlOrRd,
        ColorScheme::Cividis,
        ColorScheme::Viridis,
        ColorScheme::Inferno,
        ColorScheme::Magma,
        ColorScheme::Plasma,
        ColorScheme::Warm,
        ColorScheme::Cool,
        ColorScheme::Cubehelix,
        ColorScheme::Turbo,
        ColorScheme::BrBG,
        ColorScheme::PRGn,
        ColorScheme::PiYG,
        ColorScheme::PuOr,
        ColorScheme::RdBu,
        ColorScheme::RdGy,
        ColorScheme::RdYlBu,
        ColorScheme::RdYlGn,
        ColorScheme::Spectral,
        ColorScheme::Rainbow,
        ColorScheme::Sinebow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Blues => "Blues",
            ColorScheme::Greens => "Greens",
            ColorScheme::Greys => "Greys",
            ColorScheme::Oranges => "Oranges",
            ColorScheme::Purples => "Purples",
            ColorScheme::Reds => "Reds",
            ColorScheme::BuGn => "BuGn",
            ColorScheme::BuPu => "BuPu",
            ColorScheme::GnBu => "GnBu",
            ColorScheme::OrRd => "OrRd",
            ColorScheme::PuBu => "PuBu",
            ColorScheme::PuBuGn => "PuBuGn",
            ColorScheme::PuRd => "PuRd",
            ColorScheme::RdPu => "RdPu",
            ColorScheme::YlGnBu => "YlGnBu",
            ColorScheme::YlGn => "YlGn",
            ColorScheme::YlOrBr => "YlOrBr",
            ColorScheme::YlOrRd => "YlOrRd",
            ColorScheme::Cividis => "Cividis",
            ColorScheme::Viridis => "Viridis",
            ColorScheme::Inferno => "Inferno",
            ColorScheme::Magma => "Magma",
            ColorScheme::Plasma => "Plasma",
            ColorScheme::Warm => "Warm",
            ColorScheme::Cool => "Cool",
            ColorScheme::Cubehelix => "Cubehelix",
            ColorScheme::Turbo => "Turbo",
            ColorScheme::BrBG => "BrBG",
            ColorScheme::PRGn => "PRGn",
            ColorScheme::PiYG => "PiYG",
            ColorScheme::PuOr => "PuOr",
            ColorScheme::RdBu => "RdBu",
            ColorScheme::RdGy => "RdGy",
            ColorScheme::RdYlBu => "RdYlBu",
            ColorScheme::RdYlGn => "RdYlGn",
            ColorScheme::Spectral => "Spectral",
            ColorScheme::Rainbow => "Rainbow",
            ColorScheme::Sinebow => "Sinebow",
        }
    }

    /// Unknown names yield `None`; stored values are advisory.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|scheme| scheme.name() == name)
    }

    pub fn group(self) -> SchemeGroup {
        use ColorScheme::*;
        match self {
            Blues | Greens | Greys | Oranges | Purples | Reds => SchemeGroup::SingleHue,
            BrBG | PRGn | PiYG | PuOr | RdBu | RdGy | RdYlBu | RdYlGn | Spectral => {
                SchemeGroup::Diverging
            }
            Rainbow | Sinebow => SchemeGroup::Cyclical,
            _ => SchemeGroup::MultiHue,
        }
    }

    /// Published color stops, low to high.
    pub fn stops(self) -> &'static [&'static str] {
        match self {
            ColorScheme::Blues => &["#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594"],
            ColorScheme::Greens => &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
            ColorScheme::Greys => &["#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525"],
            ColorScheme::Oranges => &["#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#8c2d04"],
            ColorScheme::Purples => &["#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#4a1486"],
            ColorScheme::Reds => &["#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#99000d"],
            ColorScheme::BuGn => &["#f7fcfd", "#e5f5f9", "#ccece6", "#99d8c9", "#66c2a4", "#41ae76", "#238b45", "#005824"],
            ColorScheme::BuPu => &["#f7fcfd", "#e0ecf4", "#bfd3e6", "#9ebcda", "#8c96c6", "#8c6bb1", "#88419d", "#6e016b"],
            ColorScheme::GnBu => &["#f7fcf0", "#e0f3db", "#ccebc5", "#a8ddb5", "#7bccc4", "#4eb3d3", "#2b8cbe", "#08589e"],
            ColorScheme::OrRd => &["#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#990000"],
            ColorScheme::PuBu => &["#fff7fb", "#ece7f2", "#d0d1e6", "#a6bddb", "#74a9cf", "#3690c0", "#0570b0", "#034e7b"],
            ColorScheme::PuBuGn => &["#fff7fb", "#ece2f0", "#d0d1e6", "#a6bddb", "#67a9cf", "#3690c0", "#02818a", "#016c59"],
            ColorScheme::PuRd => &["#f7f4f9", "#e7e1ef", "#d4b9da", "#c994c7", "#df65b0", "#e7298a", "#ce1256", "#91003f"],
            ColorScheme::RdPu => &["#fff7f3", "#fde0dd", "#fcc5c0", "#fa9fb5", "#f768a1", "#dd3497", "#ae017e", "#7a0177"],
            ColorScheme::YlGnBu => &["#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#0c2c84"],
            ColorScheme::YlGn => &["#ffffe5", "#f7fcb9", "#d9f0a3", "#addd8e", "#78c679", "#41ab5d", "#238443", "#005a32"],
            ColorScheme::YlOrBr => &["#ffffe5", "#fff7bc", "#fee391", "#fec44f", "#fe9929", "#ec7014", "#cc4c02", "#8c2d04"],
            ColorScheme::YlOrRd => &["#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#b10026"],
            ColorScheme::Cividis => &["#00204c", "#00306f", "#39486b", "#585271", "#716c7a", "#8a8682", "#a5a186", "#bebe7a"],
            ColorScheme::Viridis => &["#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58", "#b5de2b", "#fde725"],
            ColorScheme::Inferno => &["#000004", "#160b39", "#420a68", "#6a176e", "#932667", "#bc3754", "#dd513a", "#f37819", "#fca50a", "#f6d746"],
            ColorScheme::Magma => &["#000004", "#140e36", "#3b0f70", "#641a80", "#8c2981", "#b5367a", "#de4968", "#f66e5c", "#fe9f6d", "#fecf92"],
            ColorScheme::Plasma => &["#0d0887", "#41049d", "#6a00a8", "#8f0da4", "#b12a90", "#cc4778", "#e16462", "#f2844b", "#fca636", "#f0f921"],
            ColorScheme::Warm => &["#6e40aa", "#963db3", "#bf3caf", "#e4419d", "#fe4b83", "#ff5e63", "#ff7847", "#fb9633", "#e2b72f", "#c6d63c"],
            ColorScheme::Cool => &["#6e40aa", "#6054c8", "#4c6edb", "#368ce1", "#23abd8", "#1ac7c2", "#1ddfa3", "#52f667", "#90fd5a", "#d8f239"],
            ColorScheme::Cubehelix => &["#000000", "#182a8e", "#2a518a", "#416780", "#5c7e79", "#769c77", "#91b77a", "#acca8a", "#c7d5a9", "#e1dfcf", "#f7f7f7"],
            ColorScheme::Turbo => &["#23171b", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925", "#fb9b06", "#f2cb3c", "#d9f9a3", "#85fccb", "#30123b"],
            ColorScheme::BrBG => &["#543005", "#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#f5f5f5", "#c7eae5", "#80cdc1", "#35978f", "#01665e", "#003c30"],
            ColorScheme::PRGn => &["#40004b", "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#f7f7f7", "#d9f0d3", "#a6dba0", "#5aae61", "#1b7837", "#00441b"],
            ColorScheme::PiYG => &["#8e0152", "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#f7f7f7", "#e6f5d0", "#b8e186", "#7fbc41", "#4d9221", "#276419"],
            ColorScheme::PuOr => &["#7f3b08", "#b35806", "#e08214", "#fdb863", "#fee0b6", "#f7f7f7", "#d8daeb", "#b2abd2", "#8073ac", "#542788", "#2d004b"],
            ColorScheme::RdBu => &["#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de", "#4393c3", "#2166ac", "#053061"],
            ColorScheme::RdGy => &["#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#ffffff", "#e0e0e0", "#bababa", "#878787", "#4d4d4d", "#1a1a1a"],
            ColorScheme::RdYlBu => &["#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9", "#74add1", "#4575b4", "#313695"],
            ColorScheme::RdYlGn => &["#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a", "#66bd63", "#1a9850", "#006837"],
            ColorScheme::Spectral => &["#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4", "#66c2a5", "#3288bd", "#5e4fa2"],
            ColorScheme::Rainbow => &["#6e40aa", "#be3caf", "#fe4b83", "#ff7847", "#e2b72f", "#aff05b", "#52f667", "#1ddfa3", "#23abd8", "#4c6edb", "#6e40aa"],
            ColorScheme::Sinebow => &["#ff4040", "#ff4820", "#ff6c00", "#ffa000", "#ffd200", "#ffff00", "#80ff00", "#00ff00", "#00ff80", "#00ffff", "#0080ff", "#0000ff", "#8000ff", "#ff00ff", "#ff0080", "#ff4040"],
        }
    }

    /// CSS `linear-gradient` used for the scheme swatch in the picker.
    pub fn css_gradient(self) -> String {
        format!("linear-gradient(to right, {})", self.stops().join(", "))
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ColorScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
