use tracing::{debug, error, info};

use crate::assignment::{GestureKey, KeyPolicies};
use crate::config::NavigationConfig;
use crate::document::{Direction, Document};
use crate::error::{ConfigError, NavigationError};
use crate::navigator::NavigationOutcome;

/// Gestures bound to [`Script::MoveByWordEx`] while the plugin is installed
pub const MOVE_BY_WORD_EX_GESTURES: [&str; 2] = [
    "kb:control+windows+leftArrow",
    "kb:control+windows+rightArrow",
];

/// Scripts the plugin can attach to host gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Control+Left/Right, replacing the host's own move by word
    MoveByWord,
    /// Control+Windows+Left/Right
    MoveByWordEx,
}

/// Host side table of gesture bindings
pub trait GestureRegistry {
    /// Bind `gesture` to `script`
    fn bind(&mut self, gesture: &str, script: Script);

    /// Remove the binding for `gesture`, returning the script it pointed to
    fn unbind(&mut self, gesture: &str) -> Option<Script>;

    /// Route the host's built-in move by word command through `script`
    fn override_move_by_word(&mut self, script: Script);

    /// Give the host's built-in move by word command back to the host
    fn restore_move_by_word(&mut self);
}

/// Which control key was held, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSide {
    Left,
    Right,
}

/// A key press forwarded by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
    pub script: Script,
    /// Control key held for [`Script::MoveByWord`]; `None` if the host did not see one
    pub control: Option<ControlSide>,
    /// Host name of the main key, such as `leftArrow`
    pub main_key: String,
}

impl Gesture {
    pub fn new(script: Script, control: Option<ControlSide>, main_key: impl Into<String>) -> Self {
        Self {
            script,
            control,
            main_key: main_key.into(),
        }
    }
}

/// What the host should do after the plugin looked at a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The plugin handled the gesture
    Navigated(NavigationOutcome),
    /// Let the host run its default behavior for the gesture
    PassThrough,
}

/// Word navigation plugin: owns the compiled policies and the host bindings
#[derive(Debug)]
pub struct WordNav {
    config: NavigationConfig,
    policies: KeyPolicies,
    installed_gestures: Vec<&'static str>,
    overriding: bool,
}

impl WordNav {
    /// Validate `config` and compile its policies
    pub fn new(config: NavigationConfig) -> Result<Self, ConfigError> {
        let policies = config.key_policies()?;
        Ok(Self {
            config,
            policies,
            installed_gestures: Vec::new(),
            overriding: false,
        })
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn policies(&self) -> &KeyPolicies {
        &self.policies
    }

    pub fn is_installed(&self) -> bool {
        self.overriding || !self.installed_gestures.is_empty()
    }

    /// Attach the plugin's scripts to the host
    pub fn install<R>(&mut self, registry: &mut R)
    where
        R: GestureRegistry + ?Sized,
    {
        if self.is_installed() {
            return;
        }

        registry.override_move_by_word(Script::MoveByWord);
        self.overriding = true;

        if self.config.enable_move_by_word_ex {
            for gesture in MOVE_BY_WORD_EX_GESTURES {
                registry.bind(gesture, Script::MoveByWordEx);
                self.installed_gestures.push(gesture);
            }
        }

        info!(
            gestures = self.installed_gestures.len(),
            "installed word navigation"
        );
    }

    /// Remove everything [`install`](Self::install) attached
    pub fn uninstall<R>(&mut self, registry: &mut R)
    where
        R: GestureRegistry + ?Sized,
    {
        for gesture in self.installed_gestures.drain(..) {
            if registry.unbind(gesture).is_none() {
                debug!(gesture, "gesture was already unbound");
            }
        }
        if self.overriding {
            registry.restore_move_by_word();
            self.overriding = false;
        }
    }

    /// Handle a gesture for the document that has focus in `application`.
    ///
    /// Returns an error when the host routes a gesture that was never bound: a
    /// main key with no direction, or a move by word without a control key.
    pub fn handle<D>(
        &self,
        document: &mut D,
        gesture: &Gesture,
        application: &str,
    ) -> Result<GestureOutcome, NavigationError>
    where
        D: Document + ?Sized,
    {
        if !self.config.override_move_by_word || self.config.is_blacklisted(application) {
            return Ok(GestureOutcome::PassThrough);
        }

        let key = match (gesture.script, gesture.control) {
            (Script::MoveByWordEx, _) if !self.config.enable_move_by_word_ex => {
                return Ok(GestureOutcome::PassThrough);
            }
            (Script::MoveByWordEx, _) => GestureKey::ControlWindows,
            (Script::MoveByWord, Some(ControlSide::Left)) => GestureKey::LeftControl,
            (Script::MoveByWord, Some(ControlSide::Right)) => GestureKey::RightControl,
            (Script::MoveByWord, None) => {
                let err = NavigationError::MissingControlKey(gesture.main_key.clone());
                error!("{err}");
                return Err(err);
            }
        };

        let direction = Direction::from_key_name(&gesture.main_key).inspect_err(|e| {
            error!("{e}");
        })?;

        let Some(navigator) = self.policies.navigator(key) else {
            return Ok(GestureOutcome::PassThrough);
        };

        Ok(GestureOutcome::Navigated(
            navigator.move_by_unit(document, direction),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::document::{TextBuffer, TextPosition};
    use crate::navigator::Span;

    #[derive(Debug, Default)]
    struct Registry {
        bindings: HashMap<String, Script>,
        move_by_word: Option<Script>,
    }

    impl GestureRegistry for Registry {
        fn bind(&mut self, gesture: &str, script: Script) {
            self.bindings.insert(gesture.to_string(), script);
        }

        fn unbind(&mut self, gesture: &str) -> Option<Script> {
            self.bindings.remove(gesture)
        }

        fn override_move_by_word(&mut self, script: Script) {
            self.move_by_word = Some(script);
        }

        fn restore_move_by_word(&mut self) {
            self.move_by_word = None;
        }
    }

    fn plugin(config: NavigationConfig) -> WordNav {
        WordNav::new(config).unwrap()
    }

    fn gesture(control: ControlSide, key: &str) -> Gesture {
        Gesture::new(Script::MoveByWord, Some(control), key)
    }

    #[test]
    fn test_install_and_uninstall() {
        let mut registry = Registry::default();
        registry.bind("kb:nvda+f1", Script::MoveByWord);
        let mut wordnav = plugin(NavigationConfig::default());

        wordnav.install(&mut registry);
        assert!(wordnav.is_installed());
        assert_eq!(registry.move_by_word, Some(Script::MoveByWord));
        assert_eq!(registry.bindings.len(), 3);
        assert_eq!(
            registry.bindings.get("kb:control+windows+leftArrow"),
            Some(&Script::MoveByWordEx)
        );

        // Installing twice changes nothing
        wordnav.install(&mut registry);
        assert_eq!(registry.bindings.len(), 3);

        wordnav.uninstall(&mut registry);
        assert!(!wordnav.is_installed());
        assert_eq!(registry.move_by_word, None);
        assert_eq!(registry.bindings.len(), 1);
        assert!(registry.bindings.contains_key("kb:nvda+f1"));

        wordnav.uninstall(&mut registry);
        assert_eq!(registry.bindings.len(), 1);
    }

    #[test]
    fn test_install_without_extended_gestures() {
        let mut registry = Registry::default();
        let mut wordnav = plugin(NavigationConfig {
            enable_move_by_word_ex: false,
            ..Default::default()
        });

        wordnav.install(&mut registry);
        assert!(wordnav.is_installed());
        assert!(registry.bindings.is_empty());
        assert_eq!(registry.move_by_word, Some(Script::MoveByWord));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = NavigationConfig {
            assignment_index: 11,
            ..Default::default()
        };
        assert!(matches!(
            WordNav::new(config),
            Err(ConfigError::AssignmentIndex { .. })
        ));
    }

    #[test]
    fn test_left_and_right_control_use_their_policies() {
        // Preset 9: left control = bulky word, right control = word
        let wordnav = plugin(NavigationConfig::default());
        let mut buffer = TextBuffer::from_string("call(foo.bar):done");

        let outcome = wordnav
            .handle(&mut buffer, &gesture(ControlSide::Left, "rightArrow"), "editor")
            .unwrap();
        assert_eq!(
            outcome,
            GestureOutcome::Navigated(NavigationOutcome::Moved(Span::new(0, 5, 14)))
        );

        buffer.set_caret(0, 0);
        let outcome = wordnav
            .handle(&mut buffer, &gesture(ControlSide::Right, "rightArrow"), "editor")
            .unwrap();
        assert_eq!(
            outcome,
            GestureOutcome::Navigated(NavigationOutcome::Moved(Span::new(0, 4, 5)))
        );
    }

    #[test]
    fn test_control_windows_uses_modified_policy() {
        let wordnav = plugin(NavigationConfig::default());
        let mut buffer = TextBuffer::from_string("fooBarBaz");

        let ex = Gesture::new(Script::MoveByWordEx, None, "rightArrow");
        let outcome = wordnav.handle(&mut buffer, &ex, "editor").unwrap();
        assert_eq!(
            outcome,
            GestureOutcome::Navigated(NavigationOutcome::Moved(Span::new(0, 3, 6)))
        );
        assert_eq!(buffer.caret(), TextPosition::new(0, 3));
    }

    #[test]
    fn test_unassigned_control_windows_passes_through() {
        let wordnav = plugin(NavigationConfig {
            assignment_index: 0,
            ..Default::default()
        });
        let mut buffer = TextBuffer::from_string("fooBarBaz");

        let ex = Gesture::new(Script::MoveByWordEx, None, "rightArrow");
        assert_eq!(
            wordnav.handle(&mut buffer, &ex, "editor"),
            Ok(GestureOutcome::PassThrough)
        );
        assert_eq!(buffer.caret(), TextPosition::new(0, 0));
    }

    #[test]
    fn test_disabled_override_passes_through() {
        let wordnav = plugin(NavigationConfig {
            override_move_by_word: false,
            ..Default::default()
        });
        let mut buffer = TextBuffer::from_string("hello world");

        assert_eq!(
            wordnav.handle(&mut buffer, &gesture(ControlSide::Right, "rightArrow"), "editor"),
            Ok(GestureOutcome::PassThrough)
        );
    }

    #[test]
    fn test_blacklisted_application_passes_through() {
        let wordnav = plugin(NavigationConfig {
            applications_blacklist: vec!["notepad".to_string()],
            ..Default::default()
        });
        let mut buffer = TextBuffer::from_string("hello world");

        assert_eq!(
            wordnav.handle(&mut buffer, &gesture(ControlSide::Right, "rightArrow"), "Notepad"),
            Ok(GestureOutcome::PassThrough)
        );
        assert!(matches!(
            wordnav.handle(&mut buffer, &gesture(ControlSide::Right, "rightArrow"), "winword"),
            Ok(GestureOutcome::Navigated(NavigationOutcome::Moved(_)))
        ));
    }

    #[test]
    fn test_unrecognized_key_is_an_error() {
        let wordnav = plugin(NavigationConfig::default());
        let mut buffer = TextBuffer::from_string("hello world");

        assert_eq!(
            wordnav.handle(&mut buffer, &gesture(ControlSide::Left, "upArrow"), "editor"),
            Err(NavigationError::UnrecognizedKey("upArrow".to_string()))
        );
    }

    #[test]
    fn test_move_by_word_without_control_key_is_an_error() {
        let wordnav = plugin(NavigationConfig::default());
        let mut buffer = TextBuffer::from_string("hello world");
        let bare = Gesture::new(Script::MoveByWord, None, "rightArrow");

        assert_eq!(
            wordnav.handle(&mut buffer, &bare, "editor"),
            Err(NavigationError::MissingControlKey("rightArrow".to_string()))
        );
        assert_eq!(buffer.caret(), TextPosition::new(0, 0));
    }

    #[test]
    fn test_exhausted_is_reported_not_raised() {
        let wordnav = plugin(NavigationConfig::default());
        let mut buffer = TextBuffer::from_string("hello");
        buffer.set_caret(0, 5);

        assert_eq!(
            wordnav.handle(&mut buffer, &gesture(ControlSide::Right, "rightArrow"), "editor"),
            Ok(GestureOutcome::Navigated(NavigationOutcome::BoundaryExhausted))
        );
        assert_eq!(buffer.exhausted_count(), 1);
    }
}
