use crate::core::constants::MODEL_PLACEHOLDER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub id: String,
    pub label: String,
}

/// The model dropdown: a placeholder entry followed by the known models.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub title: String,
    pub items: Vec<PickerItem>,
    pub selected: usize,
}

impl PickerState {
    pub fn new<T: Into<String>>(title: T, items: Vec<PickerItem>, selected: usize) -> Self {
        let selected = selected.min(items.len().saturating_sub(1));
        Self {
            title: title.into(),
            items,
            selected,
        }
    }

    /// Build the dropdown for `models`, highlighting `current` when present.
    pub fn for_models(models: &[String], current: Option<&str>) -> Self {
        let items = model_options(models);
        let selected = current
            .and_then(|id| items.iter().position(|item| item.id == id))
            .unwrap_or(0);
        Self::new(MODEL_PLACEHOLDER, items, selected)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.items.get(self.selected).map(|i| i.id.as_str())
    }

    pub fn move_up(&mut self) {
        if !self.items.is_empty() {
            if self.selected == 0 {
                self.selected = self.items.len() - 1;
            } else {
                self.selected -= 1;
            }
        }
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }
}

/// Dropdown options in display order. The placeholder always comes first and
/// carries an empty identifier.
pub fn model_options(models: &[String]) -> Vec<PickerItem> {
    std::iter::once(PickerItem {
        id: String::new(),
        label: MODEL_PLACEHOLDER.to_string(),
    })
    .chain(models.iter().map(|model| PickerItem {
        id: model.clone(),
        label: model.clone(),
    }))
    .collect()
}
