#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Screen reported a zero, negative or non-finite extent or density.
    DegenerateScreen { width: f32, height: f32, density: f32 },
    /// Element cannot rest anywhere on screen without inverting its limits.
    ElementTooLarge {
        element_width: f32,
        element_height: f32,
        screen_width: f32,
        screen_height: f32,
    },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::DegenerateScreen {
                width,
                height,
                density,
            } => write!(f, "degenerate screen metrics {width}x{height} at density {density}"),
            GeometryError::ElementTooLarge {
                element_width,
                element_height,
                screen_width,
                screen_height,
            } => write!(
                f,
                "element {element_width}x{element_height} does not fit screen {screen_width}x{screen_height}"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}
