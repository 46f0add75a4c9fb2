//! Keyboard key codes
//!
//! Key events carry the host's 16-bit virtual-key value. Every value the host can
//! produce maps to a [`KeyCode`]; values outside the known table are preserved as
//! [`KeyCode::Unknown`] so a key-down/key-up pair can always be matched.

macro_rules! key_codes {
    ($($name:ident = $value:literal,)*) => {
        /// Virtual key codes
        ///
        /// Equality and hashing go through [`KeyCode::virtual_key`], so a
        /// hand-built `Unknown` holding a named value equals the named key.
        #[derive(Debug, Clone, Copy, Default)]
        pub enum KeyCode {
            /// No key
            #[default]
            None,
            $(
                #[doc = concat!(
                    "`", stringify!($name), "` key (virtual key ", stringify!($value), ")"
                )]
                $name,
            )*
            /// A virtual key outside the known table
            ///
            /// [`KeyCode::from_virtual_key`] only produces this for unnamed
            /// values.
            Unknown(u16),
        }

        impl KeyCode {
            /// Map a raw virtual-key value onto a key code
            pub const fn from_virtual_key(code: u16) -> Self {
                match code {
                    0 => Self::None,
                    $($value => Self::$name,)*
                    other => Self::Unknown(other),
                }
            }

            /// Raw virtual-key value of this key code
            pub const fn virtual_key(self) -> u16 {
                match self {
                    Self::None => 0,
                    $(Self::$name => $value,)*
                    Self::Unknown(code) => code,
                }
            }
        }
    };
}

key_codes! {
    // Control and navigation
    Back = 8,
    Tab = 9,
    Enter = 13,
    Shift = 16,
    Control = 17,
    Alt = 18,
    Pause = 19,
    CapsLock = 20,
    Escape = 27,
    Space = 32,
    PageUp = 33,
    PageDown = 34,
    End = 35,
    Home = 36,
    Left = 37,
    Up = 38,
    Right = 39,
    Down = 40,
    Insert = 45,
    Delete = 46,

    // Top row digits
    Number0 = 48,
    Number1 = 49,
    Number2 = 50,
    Number3 = 51,
    Number4 = 52,
    Number5 = 53,
    Number6 = 54,
    Number7 = 55,
    Number8 = 56,
    Number9 = 57,

    A = 65, B = 66, C = 67, D = 68, E = 69, F = 70, G = 71, H = 72,
    I = 73, J = 74, K = 75, L = 76, M = 77, N = 78, O = 79, P = 80,
    Q = 81, R = 82, S = 83, T = 84, U = 85, V = 86, W = 87, X = 88,
    Y = 89, Z = 90,

    LeftWindows = 91,
    RightWindows = 92,
    Application = 93,

    NumPad0 = 96,
    NumPad1 = 97,
    NumPad2 = 98,
    NumPad3 = 99,
    NumPad4 = 100,
    NumPad5 = 101,
    NumPad6 = 102,
    NumPad7 = 103,
    NumPad8 = 104,
    NumPad9 = 105,
    Multiply = 106,
    Add = 107,
    Separator = 108,
    Subtract = 109,
    Decimal = 110,
    Divide = 111,

    F1 = 112, F2 = 113, F3 = 114, F4 = 115, F5 = 116, F6 = 117,
    F7 = 118, F8 = 119, F9 = 120, F10 = 121, F11 = 122, F12 = 123,
    F13 = 124, F14 = 125, F15 = 126, F16 = 127, F17 = 128, F18 = 129,
    F19 = 130, F20 = 131, F21 = 132, F22 = 133, F23 = 134, F24 = 135,

    NumLock = 144,

    LeftShift = 160,
    RightShift = 161,
    LeftControl = 162,
    RightControl = 163,
    LeftAlt = 164,
    RightAlt = 165,

    GamepadA = 195,
    GamepadB = 196,
    GamepadX = 197,
    GamepadY = 198,
    GamepadRightShoulder = 199,
    GamepadLeftShoulder = 200,
    GamepadLeftTrigger = 201,
    GamepadRightTrigger = 202,
    GamepadDPadUp = 203,
    GamepadDPadDown = 204,
    GamepadDPadLeft = 205,
    GamepadDPadRight = 206,
    GamepadMenu = 207,
    GamepadView = 208,
    GamepadLeftThumbstickButton = 209,
    GamepadRightThumbstickButton = 210,
    GamepadLeftThumbstickUp = 211,
    GamepadLeftThumbstickDown = 212,
    GamepadLeftThumbstickRight = 213,
    GamepadLeftThumbstickLeft = 214,
    GamepadRightThumbstickUp = 215,
    GamepadRightThumbstickDown = 216,
    GamepadRightThumbstickRight = 217,
    GamepadRightThumbstickLeft = 218,
}

impl KeyCode {
    /// Whether this is one of the generic or sided modifier keys
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::Shift
                | Self::Control
                | Self::Alt
                | Self::LeftShift
                | Self::RightShift
                | Self::LeftControl
                | Self::RightControl
                | Self::LeftAlt
                | Self::RightAlt
        )
    }
}

impl PartialEq for KeyCode {
    fn eq(&self, other: &Self) -> bool {
        self.virtual_key() == other.virtual_key()
    }
}

impl Eq for KeyCode {}

impl std::hash::Hash for KeyCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.virtual_key().hash(state);
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        Self::from_virtual_key(code)
    }
}
