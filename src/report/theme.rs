use crossterm::style::Color;

pub struct Theme {
    pub fg: Color,
    pub comment: Color, // Grey
    pub success: Color, // Green
    pub error: Color,   // Red
    pub warning: Color, // Orange
    pub keyword: Color,
    pub identifier: Color,
    pub string: Color,
    pub number: Color,
    pub operator: Color,
    pub type_name: Color, // Cyan for type names
    pub scope: Color,
    pub method: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb { r: 205, g: 214, b: 244 },
    comment: Color::Rgb { r: 108, g: 112, b: 134 },
    success: Color::Rgb { r: 166, g: 227, b: 161 },
    error: Color::Rgb { r: 243, g: 139, b: 168 },
    warning: Color::Rgb { r: 250, g: 179, b: 135 },
    keyword: Color::Rgb { r: 137, g: 180, b: 250 },  // Blue for keywords
    identifier: Color::Rgb { r: 205, g: 214, b: 244 },
    string: Color::Rgb { r: 250, g: 179, b: 135 },   // Orange for strings
    number: Color::Rgb { r: 250, g: 179, b: 135 },   // Orange for numbers
    operator: Color::Rgb { r: 108, g: 112, b: 134 },
    type_name: Color::Rgb { r: 148, g: 226, b: 213 }, // Cyan/teal for type names
    scope: Color::Rgb { r: 245, g: 194, b: 231 },     // Pink for scope names
    method: Color::Rgb { r: 249, g: 226, b: 175 },    // Yellow for methods
};
