// Key codes used to index the keys snapshot
//
// Printable keys use their ASCII code (letters are upper case). Control keys
// and arrows use the low ASCII control range.

/// Number of entries in a keys snapshot
pub const KEY_COUNT: usize = 256;

pub const BACKSPACE: usize = 8;
pub const TAB: usize = 9;
pub const ENTER: usize = 10;
pub const ARROW_UP: usize = 17;
pub const ARROW_DOWN: usize = 18;
pub const ARROW_RIGHT: usize = 19;
pub const ARROW_LEFT: usize = 20;
pub const ESCAPE: usize = 27;
pub const SPACE: usize = 32;
pub const DELETE: usize = 127;

/// Key code for an ASCII character, if it has one
///
/// Lower-case letters map to their upper-case code.
pub fn from_char(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    let code = c.to_ascii_uppercase() as usize;
    (code < KEY_COUNT).then_some(code)
}

/// Key code for a winit physical key
#[cfg(feature = "winit")]
pub fn from_winit(key: winit::keyboard::KeyCode) -> Option<usize> {
    use winit::keyboard::KeyCode;

    let code = match key {
        KeyCode::Backspace => BACKSPACE,
        KeyCode::Tab => TAB,
        KeyCode::Enter | KeyCode::NumpadEnter => ENTER,
        KeyCode::ArrowUp => ARROW_UP,
        KeyCode::ArrowDown => ARROW_DOWN,
        KeyCode::ArrowRight => ARROW_RIGHT,
        KeyCode::ArrowLeft => ARROW_LEFT,
        KeyCode::Escape => ESCAPE,
        KeyCode::Space => SPACE,
        KeyCode::Delete => DELETE,
        KeyCode::KeyA => b'A' as usize,
        KeyCode::KeyB => b'B' as usize,
        KeyCode::KeyC => b'C' as usize,
        KeyCode::KeyD => b'D' as usize,
        KeyCode::KeyE => b'E' as usize,
        KeyCode::KeyF => b'F' as usize,
        KeyCode::KeyG => b'G' as usize,
        KeyCode::KeyH => b'H' as usize,
        KeyCode::KeyI => b'I' as usize,
        KeyCode::KeyJ => b'J' as usize,
        KeyCode::KeyK => b'K' as usize,
        KeyCode::KeyL => b'L' as usize,
        KeyCode::KeyM => b'M' as usize,
        KeyCode::KeyN => b'N' as usize,
        KeyCode::KeyO => b'O' as usize,
        KeyCode::KeyP => b'P' as usize,
        KeyCode::KeyQ => b'Q' as usize,
        KeyCode::KeyR => b'R' as usize,
        KeyCode::KeyS => b'S' as usize,
        KeyCode::KeyT => b'T' as usize,
        KeyCode::KeyU => b'U' as usize,
        KeyCode::KeyV => b'V' as usize,
        KeyCode::KeyW => b'W' as usize,
        KeyCode::KeyX => b'X' as usize,
        KeyCode::KeyY => b'Y' as usize,
        KeyCode::KeyZ => b'Z' as usize,
        KeyCode::Digit0 | KeyCode::Numpad0 => b'0' as usize,
        KeyCode::Digit1 | KeyCode::Numpad1 => b'1' as usize,
        KeyCode::Digit2 | KeyCode::Numpad2 => b'2' as usize,
        KeyCode::Digit3 | KeyCode::Numpad3 => b'3' as usize,
        KeyCode::Digit4 | KeyCode::Numpad4 => b'4' as usize,
        KeyCode::Digit5 | KeyCode::Numpad5 => b'5' as usize,
        KeyCode::Digit6 | KeyCode::Numpad6 => b'6' as usize,
        KeyCode::Digit7 | KeyCode::Numpad7 => b'7' as usize,
        KeyCode::Digit8 | KeyCode::Numpad8 => b'8' as usize,
        KeyCode::Digit9 | KeyCode::Numpad9 => b'9' as usize,
        KeyCode::Minus | KeyCode::NumpadSubtract => b'-' as usize,
        KeyCode::Equal => b'=' as usize,
        KeyCode::BracketLeft => b'[' as usize,
        KeyCode::BracketRight => b']' as usize,
        KeyCode::Backslash => b'\\' as usize,
        KeyCode::Semicolon => b';' as usize,
        KeyCode::Quote => b'\'' as usize,
        KeyCode::Backquote => b'`' as usize,
        KeyCode::Comma => b',' as usize,
        KeyCode::Period | KeyCode::NumpadDecimal => b'.' as usize,
        KeyCode::Slash | KeyCode::NumpadDivide => b'/' as usize,
        KeyCode::NumpadAdd => b'+' as usize,
        KeyCode::NumpadMultiply => b'*' as usize,
        _ => return None,
    };
    Some(code)
}
