use serde::{Deserialize, Serialize};

/// A color packed as `0xRRGGBBAA`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn alpha(self) -> u8 {
        self.0 as u8
    }

    pub fn css(self) -> String {
        number_to_rgba(self.0)
    }
}

/// Alpha is written as 0-255, the way the server packs it.
pub fn number_to_rgba(n: u32) -> String {
    let color = PackedColor(n);
    format!(
        "rgba({},{},{},{})",
        color.red(),
        color.green(),
        color.blue(),
        color.alpha()
    )
}
