//! Owned application state: the inventory, what is on screen, and the
//! item being edited.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::form::{FormError, FormMode, ItemDraft, ItemForm};
use crate::image::resolve_or_keep;
use crate::item::{Item, ItemId};
use crate::notice::{ITEM_ADDED, ITEM_DELETED, ITEM_UPDATED, Notices};
use crate::persist::{self, PersistError};
use crate::render::{self, Row};
use crate::store::Store;
use crate::view::{self, SortKey};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Answer to the delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

/// Result of a committed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    Added(ItemId),
    Updated(ItemId),
    /// The edited item was removed before the form was submitted.
    Missing(ItemId),
}

impl Committed {
    pub fn id(&self) -> &ItemId {
        match self {
            Committed::Added(id) | Committed::Updated(id) | Committed::Missing(id) => id,
        }
    }
}

pub struct Session<S> {
    store: S,
    inventory: Vec<Item>,
    displayed: Vec<Item>,
    pending_edit: Option<Item>,
    notices: Notices,
}

impl<S: Store> Session<S> {
    /// Hydrates the inventory from `store` and displays all of it.
    pub fn open(store: S) -> Self {
        let inventory = persist::load(&store);
        info!(count = inventory.len(), "session opened");
        Self {
            displayed: inventory.clone(),
            store,
            inventory,
            pending_edit: None,
            notices: Notices::default(),
        }
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notices = Notices::new(ttl);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// The list most recently handed to the renderer.
    pub fn displayed(&self) -> &[Item] {
        &self.displayed
    }

    pub fn rows(&self) -> Vec<Row> {
        render::rows(&self.displayed)
    }

    pub fn find(&self, id: &str) -> Option<&Item> {
        self.inventory.iter().find(|item| item.id == id)
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn show_all(&mut self) {
        self.displayed = self.inventory.clone();
    }

    pub fn search(&mut self, query: &str) {
        self.displayed = view::search(&self.inventory, query);
    }

    /// Sorts by a user-chosen field name; unknown names show the inventory as is.
    pub fn sort(&mut self, field: &str) {
        self.displayed = view::sorted_by_name(&self.inventory, field);
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.displayed = view::sorted(&self.inventory, key);
    }

    /// Removes the item once the user has accepted the prompt.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self, id: &str, answer: Confirmation) -> Result<bool, PersistError> {
        if answer == Confirmation::Declined {
            return Ok(false);
        }
        let before = self.inventory.len();
        self.inventory.retain(|item| item.id != id);
        if self.inventory.len() == before {
            debug!(id, "delete of unknown item ignored");
            return Ok(false);
        }

        // The view follows the inventory even when the save fails.
        self.show_all();
        self.save()?;
        self.notices.push(ITEM_DELETED);
        info!(id, "item deleted");
        Ok(true)
    }

    /// Stages an item for editing. Unknown ids leave nothing staged.
    pub fn start_edit(&mut self, id: &str) -> bool {
        match self.find(id).cloned() {
            Some(item) => {
                debug!(id, "edit started");
                self.pending_edit = Some(item);
                true
            }
            None => {
                warn!(id, "edit requested for unknown item");
                false
            }
        }
    }

    pub fn pending_edit(&self) -> Option<&Item> {
        self.pending_edit.as_ref()
    }

    /// Mode and initial field text for a newly opened form.
    pub fn open_form(&self) -> (FormMode, ItemForm) {
        match &self.pending_edit {
            Some(item) => (FormMode::Edit(item.clone()), ItemForm::from_item(item)),
            None => (FormMode::Create, ItemForm::default()),
        }
    }

    pub fn cancel_form(&mut self) {
        self.pending_edit = None;
    }

    /// Applies a validated draft whose image is already resolved, then persists.
    ///
    /// An edit whose target is gone changes nothing and returns
    /// [`Committed::Missing`].
    pub fn commit(
        &mut self,
        mode: &FormMode,
        draft: ItemDraft,
        image: String,
    ) -> Result<Committed, PersistError> {
        let committed = match mode {
            FormMode::Create => {
                let id = next_id(&self.inventory, Utc::now().timestamp_millis());
                self.inventory.push(draft.into_item(id.clone(), image));
                Committed::Added(id)
            }
            FormMode::Edit(original) => {
                let id = original.id.clone();
                self.pending_edit = None;
                let Some(slot) = self.inventory.iter_mut().find(|item| item.id == id) else {
                    warn!(id = %id, "edited item no longer exists");
                    self.show_all();
                    return Ok(Committed::Missing(id));
                };
                *slot = draft.into_item(id.clone(), image);
                Committed::Updated(id)
            }
        };

        self.show_all();
        self.save()?;
        self.notices.push(match committed {
            Committed::Added(_) => ITEM_ADDED,
            _ => ITEM_UPDATED,
        });
        info!(id = %committed.id(), "item saved");
        Ok(committed)
    }

    /// Validates the form, resolves its image, and commits it.
    pub async fn submit(
        &mut self,
        mode: &FormMode,
        form: &ItemForm,
    ) -> Result<Committed, SessionError> {
        let draft = form.validate()?;
        let image = resolve_or_keep(draft.image_path.clone(), mode.current_image())
            .await
            .map_err(FormError::from)?;
        Ok(self.commit(mode, draft, image)?)
    }

    fn save(&self) -> Result<(), PersistError> {
        persist::save(&self.store, &self.inventory)
    }
}

/// Millisecond timestamp id, bumped until it is not already taken.
pub fn next_id(existing: &[Item], now_ms: i64) -> ItemId {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|item| item.id == id) {
            return id;
        }
        candidate += 1;
    }
}
