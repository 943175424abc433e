use std::time::Instant;

use ratatui::widgets::TableState;
use stockroom_core::{
    Committed, Confirmation, Field, FormMode, ImageError, ItemDraft, ItemForm, ItemId, Session,
    SortKey, Store, resolve_or_keep,
};
use tokio::sync::oneshot;

use super::field::TextField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    List,
    Search,
    SelectSort,
    ConfirmDelete(ItemId),
    Form,
    Saving,
}

/// Something the user asked to do to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(ItemId),
    Delete(ItemId),
}

/// Row keys. Each binding turns the selected row's id into an [`Action`].
pub const ROW_BINDINGS: &[(char, &str, fn(ItemId) -> Action)] =
    &[('e', "Edit", Action::Edit), ('d', "Delete", Action::Delete)];

pub struct FormState {
    pub mode: FormMode,
    pub inputs: Vec<TextField>,
    pub focus: Field,
}

impl FormState {
    fn new(mode: FormMode, form: &ItemForm) -> Self {
        Self {
            mode,
            inputs: Field::ALL
                .iter()
                .map(|&f| TextField::new(form.field(f)))
                .collect(),
            focus: Field::Name,
        }
    }

    pub fn input(&self, field: Field) -> &TextField {
        &self.inputs[index_of(field)]
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        &mut self.inputs[index_of(self.focus)]
    }

    pub fn to_form(&self) -> ItemForm {
        let mut form = ItemForm::default();
        for &field in Field::ALL.iter() {
            *form.field_mut(field) = self.input(field).text().to_string();
        }
        form
    }
}

fn index_of(field: Field) -> usize {
    Field::ALL.iter().position(|&f| f == field).unwrap_or(0)
}

type ImageResult = Result<String, ImageError>;

pub struct App<S> {
    pub mode: AppMode,
    pub should_quit: bool,
    pub session: Session<S>,
    pub table: TableState,
    pub search: TextField,
    pub sort: Option<SortKey>,
    pub form: Option<FormState>,
    pub last_error: Option<String>,
    pub popup_selected: usize,
    draft: Option<ItemDraft>,
    image_rx: Option<oneshot::Receiver<ImageResult>>,
}

impl<S: Store> App<S> {
    pub fn new(session: Session<S>) -> Self {
        let mut app = Self {
            mode: AppMode::List,
            should_quit: false,
            session,
            table: TableState::default(),
            search: TextField::default(),
            sort: None,
            form: None,
            last_error: None,
            popup_selected: 0,
            draft: None,
            image_rx: None,
        };
        app.clamp_selection();
        app
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        let index = self.table.selected()?;
        self.session.displayed().get(index).map(|item| item.id.clone())
    }

    pub fn select_next(&mut self) {
        let len = self.session.displayed().len();
        if len == 0 {
            return;
        }
        let next = self.table.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.table.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        let prev = self.table.selected().map_or(0, |i| i.saturating_sub(1));
        if !self.session.displayed().is_empty() {
            self.table.select(Some(prev));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.session.displayed().len();
        match self.table.selected() {
            _ if len == 0 => self.table.select(None),
            Some(i) if i >= len => self.table.select(Some(len - 1)),
            None => self.table.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Resets the table to the whole inventory after a mutation.
    fn show_all(&mut self) {
        self.search.clear();
        self.sort = None;
        self.clamp_selection();
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Edit(id) => {
                if self.session.start_edit(&id) {
                    self.open_form();
                }
            }
            Action::Delete(id) => self.mode = AppMode::ConfirmDelete(id),
        }
    }

    pub fn dispatch_row_key(&mut self, key: char) -> bool {
        let Some((_, _, make)) = ROW_BINDINGS.iter().find(|(k, _, _)| *k == key) else {
            return false;
        };
        if let Some(id) = self.selected_id() {
            self.dispatch(make(id));
        }
        true
    }

    // Search

    pub fn begin_search(&mut self) {
        self.mode = AppMode::Search;
    }

    pub fn search_changed(&mut self) {
        self.sort = None;
        self.session.search(self.search.text());
        self.table.select(None);
        self.clamp_selection();
    }

    pub fn end_search(&mut self, keep: bool) {
        if !keep {
            self.search.clear();
            self.session.show_all();
            self.clamp_selection();
        }
        self.mode = AppMode::List;
    }

    // Sort picker

    pub fn open_sort_picker(&mut self) {
        self.popup_selected = self
            .sort
            .and_then(|s| SortKey::ALL.iter().position(|&k| k == s))
            .unwrap_or(0);
        self.mode = AppMode::SelectSort;
    }

    pub fn popup_up(&mut self) {
        self.popup_selected = self.popup_selected.saturating_sub(1);
    }

    pub fn popup_down(&mut self) {
        if self.popup_selected + 1 < SortKey::ALL.len() {
            self.popup_selected += 1;
        }
    }

    pub fn popup_select(&mut self) {
        let key = SortKey::ALL[self.popup_selected];
        self.session.sort_by(key);
        self.search.clear();
        self.sort = Some(key);
        self.clamp_selection();
        self.mode = AppMode::List;
    }

    pub fn close_popup(&mut self) {
        self.mode = AppMode::List;
    }

    // Delete

    pub fn answer_delete(&mut self, answer: Confirmation) {
        let AppMode::ConfirmDelete(id) = std::mem::replace(&mut self.mode, AppMode::List) else {
            return;
        };
        match self.session.delete(&id, answer) {
            Ok(true) => self.show_all(),
            Ok(false) => {}
            Err(e) => {
                self.show_all();
                self.last_error = Some(e.to_string());
            }
        }
    }

    // Form

    pub fn open_form(&mut self) {
        let (mode, form) = self.session.open_form();
        self.form = Some(FormState::new(mode, &form));
        self.mode = AppMode::Form;
    }

    pub fn cancel_form(&mut self) {
        self.session.cancel_form();
        self.form = None;
        self.mode = AppMode::List;
    }

    pub fn focus_next(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.focus = form.focus.next();
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.focus = form.focus.prev();
        }
    }

    pub fn focused_input(&mut self) -> Option<&mut TextField> {
        self.form.as_mut().map(FormState::focused_mut)
    }

    /// Validates the form and starts resolving its image in the background.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let draft = match form.to_form().validate() {
            Ok(draft) => draft,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return;
            }
        };

        let (tx, rx) = oneshot::channel();
        let path = draft.image_path.clone();
        let current = form.mode.current_image();

        tokio::spawn(async move {
            let result = resolve_or_keep(path, current).await;
            let _ = tx.send(result);
        });

        self.draft = Some(draft);
        self.image_rx = Some(rx);
        self.mode = AppMode::Saving;
        self.last_error = None;
    }

    pub fn poll_image(&mut self) {
        let Some(rx) = self.image_rx.as_mut() else {
            return;
        };
        let image = match rx.try_recv() {
            Ok(Ok(image)) => image,
            Ok(Err(e)) => {
                self.fail_save(e.to_string());
                return;
            }
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.fail_save("Image read was interrupted".to_string());
                return;
            }
        };
        self.image_rx = None;

        let (Some(form), Some(draft)) = (self.form.take(), self.draft.take()) else {
            self.mode = AppMode::List;
            return;
        };
        match self.session.commit(&form.mode, draft, image) {
            Ok(Committed::Missing(_)) => {
                self.show_all();
                self.last_error = Some("The edited item no longer exists".to_string());
            }
            Ok(committed) => {
                self.show_all();
                let index = self
                    .session
                    .displayed()
                    .iter()
                    .position(|item| item.id == *committed.id());
                self.table.select(index);
            }
            Err(e) => {
                self.show_all();
                self.last_error = Some(e.to_string());
            }
        }
        self.mode = AppMode::List;
    }

    fn fail_save(&mut self, message: String) {
        self.image_rx = None;
        self.draft = None;
        self.last_error = Some(message);
        self.mode = AppMode::Form;
    }

    pub fn tick(&mut self, now: Instant) {
        self.session.notices_mut().prune(now);
    }
}
