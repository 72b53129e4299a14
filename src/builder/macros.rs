//! Macros for ergonomic state identity declaration.

/// Declare an identity enum and its `StateId` implementation.
///
/// The optional `parents:` clause declares which variant each variant
/// specializes, enabling is-a checks and supertype lookup.
///
/// # Example
///
/// ```
/// use statewise::core::StateId;
/// use statewise::state_enum;
///
/// state_enum! {
///     pub enum Screen {
///         Home,
///         Settings,
///         AudioSettings,
///         VideoSettings,
///     }
///     parents: [AudioSettings => Settings, VideoSettings => Settings]
/// }
///
/// assert_eq!(Screen::AudioSettings.name(), "AudioSettings");
/// assert!(Screen::VideoSettings.is_kind_of(&Screen::Settings));
/// assert!(!Screen::Home.is_kind_of(&Screen::Settings));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(parents: [$($child:ident => $parent:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateId for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn parent(&self) -> Option<Self> {
                match self {
                    $($(Self::$child => Some(Self::$parent),)*)?
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::StateId;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Retrying,
            Complete,
        }
        parents: [Retrying => Processing]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Retrying.name(), "Retrying");
        assert_eq!(TestState::Retrying.parent(), Some(TestState::Processing));
        assert_eq!(TestState::Processing.parent(), None);
    }

    #[test]
    fn state_enum_supports_kind_of() {
        assert!(TestState::Retrying.is_kind_of(&TestState::Processing));
        assert!(!TestState::Processing.is_kind_of(&TestState::Retrying));
        assert!(!TestState::Complete.is_kind_of(&TestState::Processing));
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        let _state = PublicState::A;
    }

    #[test]
    fn state_enum_works_without_parents() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert_eq!(MinimalState::One.parent(), None);
        assert!(MinimalState::Two.is_kind_of(&MinimalState::Two));
    }
}
