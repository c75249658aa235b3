use nu_ansi_term::Color;

pub mod catppuccin {
    use nu_ansi_term::Color;

    pub struct Mocha;

    impl Mocha {
        pub const OVERLAY0: Color = Color::Rgb(108, 112, 134);
        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const GREEN: Color = Color::Rgb(166, 227, 161);
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);
        pub const MAUVE: Color = Color::Rgb(203, 166, 247);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
        pub const TEAL: Color = Color::Rgb(148, 226, 213);
        pub const SKY: Color = Color::Rgb(137, 220, 235);
    }
}

/// Operator colors used by the REPL highlighter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub plus: Color,
    pub minus: Color,
    pub left: Color,
    pub right: Color,
    pub output: Color,
    pub input: Color,
    pub bracket: Color,
    pub comment: Color,
}

impl Default for Palette {
    fn default() -> Self {
        use catppuccin::Mocha as P;

        Self {
            plus: P::GREEN,
            minus: P::RED,
            left: P::TEAL,
            right: P::SKY,
            output: P::YELLOW,
            input: P::PEACH,
            bracket: P::MAUVE,
            comment: P::OVERLAY0,
        }
    }
}

impl Palette {
    pub fn color_for(&self, ch: char) -> Color {
        match ch {
            '+' => self.plus,
            '-' => self.minus,
            '<' => self.left,
            '>' => self.right,
            '.' => self.output,
            ',' => self.input,
            '[' | ']' => self.bracket,
            _ => self.comment,
        }
    }
}

/// Parse `#RRGGBB` or a named color.
pub fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let color = match s.to_ascii_lowercase().replace('_', "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "purple" | "magenta" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightblue" => Color::LightBlue,
        "lightpurple" | "lightmagenta" => Color::LightPurple,
        "lightcyan" => Color::LightCyan,
        _ => return None,
    };
    Some(color)
}
