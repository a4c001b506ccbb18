/// A closed, integer-backed enumeration whose values are mirrored as constants
/// in shader code.
pub trait ShaderEnum: Copy + Sized + 'static {
    /// Type name used on the shader side.
    const SHADER_NAME: &'static str;

    /// Every enumerant, in declaration order.
    fn variants() -> &'static [Self];

    /// The integer value shared with the shader.
    fn index(self) -> u32;

    /// Enumerant name used on the shader side.
    fn shader_name(self) -> &'static str;
}

/// Declares a `#[repr(u32)]` enum together with its shader-facing names,
/// a `ShaderEnum` impl and a fallible `TryFrom<u32>`.
macro_rules! shader_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $shader:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $sname:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            pub const fn index(self) -> u32 {
                self as u32
            }
        }

        impl $crate::enums::ShaderEnum for $name {
            const SHADER_NAME: &'static str = $shader;

            fn variants() -> &'static [Self] {
                Self::ALL
            }

            fn index(self) -> u32 {
                self as u32
            }

            fn shader_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $sname ),+
                }
            }
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::LayoutError;

            fn try_from(value: u32) -> ::core::result::Result<Self, Self::Error> {
                match value {
                    $( $value => Ok(Self::$variant), )+
                    _ => Err($crate::LayoutError::UnknownDiscriminant { ty: $shader, value }),
                }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value as u32
            }
        }
    };
}

pub(crate) use shader_enum;

#[cfg(test)]
mod tests {
    // The crate's one-parameter `Result` alias is in scope where the macro
    // expands; the generated `TryFrom` must not pick it up.
    use super::ShaderEnum;
    use crate::{LayoutError, Result};

    shader_enum! {
        pub enum Channel as "Channel" {
            Red = 0 => "ChannelRed",
            Green = 5 => "ChannelGreen",
        }
    }

    fn decode(value: u32) -> Result<Channel> {
        Channel::try_from(value)
    }

    #[test]
    fn expands_next_to_the_crate_result_alias() {
        assert_eq!(decode(5).unwrap(), Channel::Green);
        assert_eq!(
            decode(1).unwrap_err(),
            LayoutError::UnknownDiscriminant {
                ty: "Channel",
                value: 1
            }
        );
    }

    #[test]
    fn trait_view_matches_the_enum() {
        assert_eq!(Channel::SHADER_NAME, "Channel");
        assert_eq!(<Channel as ShaderEnum>::variants(), Channel::ALL);
        assert_eq!(Channel::Green.shader_name(), "ChannelGreen");
        assert_eq!(u32::from(Channel::Green), 5);
    }
}
