//! Menu model for the tray.
//!
//! The menu is static apart from the clock sound check mark, so it is built
//! once from the settings. Native menu creation happens in the
//! platform-specific code.

use super::event::MenuItemId;

// ============================================================================
// MenuItemConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    /// Item identity, also used as the native id
    pub id: MenuItemId,
    /// Display text
    pub text: String,
    /// `Some(checked)` for check items
    pub checked: Option<bool>,
}

impl MenuItemConfig {
    /// Creates a plain menu item.
    pub fn new(id: MenuItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            checked: None,
        }
    }

    /// Creates a check item.
    pub fn check(id: MenuItemId, text: impl Into<String>, checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::new(id, text)
        }
    }
}

/// An entry in the menu: an item or a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItemConfig),
    Separator,
}

// ============================================================================
// MenuConfig
// ============================================================================

/// Complete menu layout, top to bottom.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub entries: Vec<MenuEntry>,
}

impl MenuConfig {
    /// Iterates over the items, skipping separators.
    pub fn items(&self) -> impl Iterator<Item = &MenuItemConfig> {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        })
    }

    /// Finds an item by id.
    pub fn item(&self, id: MenuItemId) -> Option<&MenuItemConfig> {
        self.items().find(|item| item.id == id)
    }
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds the tray menu.
#[derive(Debug)]
pub struct MenuBuilder {
    version: String,
}

impl Default for MenuBuilder {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl MenuBuilder {
    /// Creates a builder that shows `version` in the title item.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Builds the menu with the clock sound item checked as given.
    pub fn build(&self, clock_sound: bool) -> MenuConfig {
        use MenuEntry::{Item, Separator};

        MenuConfig {
            entries: vec![
                Item(MenuItemConfig::new(
                    MenuItemId::Website,
                    format!("Pomodoro Timer v{}", self.version),
                )),
                Separator,
                Item(MenuItemConfig::new(MenuItemId::StartPomodoro, "Start Pomodoro")),
                Item(MenuItemConfig::new(MenuItemId::StartBreak, "Start Break")),
                Item(MenuItemConfig::new(MenuItemId::StartLongBreak, "Start Long Break")),
                Item(MenuItemConfig::check(
                    MenuItemId::ClockSound,
                    "Clock sound",
                    clock_sound,
                )),
                Separator,
                Item(MenuItemConfig::new(MenuItemId::Settings, "Settings")),
                Separator,
                Item(MenuItemConfig::new(MenuItemId::Exit, "Exit")),
            ],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_order() {
        let config = MenuBuilder::new("1.4.0").build(true);
        let ids: Vec<_> = config.items().map(|item| item.id).collect();
        assert_eq!(
            ids,
            vec![
                MenuItemId::Website,
                MenuItemId::StartPomodoro,
                MenuItemId::StartBreak,
                MenuItemId::StartLongBreak,
                MenuItemId::ClockSound,
                MenuItemId::Settings,
                MenuItemId::Exit,
            ]
        );
    }

    #[test]
    fn test_title_shows_version() {
        let config = MenuBuilder::new("1.4.0").build(true);
        assert_eq!(
            config.item(MenuItemId::Website).unwrap().text,
            "Pomodoro Timer v1.4.0"
        );
    }

    #[test]
    fn test_default_uses_package_version() {
        let config = MenuBuilder::default().build(true);
        let title = &config.item(MenuItemId::Website).unwrap().text;
        assert!(title.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_clock_sound_check_state() {
        let on = MenuBuilder::default().build(true);
        let off = MenuBuilder::default().build(false);
        assert_eq!(on.item(MenuItemId::ClockSound).unwrap().checked, Some(true));
        assert_eq!(off.item(MenuItemId::ClockSound).unwrap().checked, Some(false));
    }

    #[test]
    fn test_only_clock_sound_is_checkable() {
        let config = MenuBuilder::default().build(true);
        let checkable: Vec<_> = config
            .items()
            .filter(|item| item.checked.is_some())
            .map(|item| item.id)
            .collect();
        assert_eq!(checkable, vec![MenuItemId::ClockSound]);
    }

    #[test]
    fn test_separators() {
        let config = MenuBuilder::default().build(true);
        let separators = config
            .entries
            .iter()
            .filter(|entry| **entry == MenuEntry::Separator)
            .count();
        assert_eq!(separators, 3);
    }
}
