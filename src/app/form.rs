//! Text-buffer state behind the add form and the edit modal.
//!
//! Fields are edited as text and only parsed into a [`BookDraft`] on submit,
//! so a half-typed number never loses keystrokes.

use crate::domain::{format_price, Book, BookDraft, BookId, ValidationError};

/// The four editable fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Author,
    PublishedYear,
    Price,
}

impl FormField {
    pub const ALL: [Self; 4] = [Self::Title, Self::Author, Self::PublishedYear, Self::Price];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::PublishedYear => "Published year",
            Self::Price => "Price",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::PublishedYear,
            Self::PublishedYear => Self::Price,
            Self::Price => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Price,
            Self::Author => Self::Title,
            Self::PublishedYear => Self::Author,
            Self::Price => Self::PublishedYear,
        }
    }
}

/// Editable contents of a book form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub published_year: String,
    pub price: String,
    pub focus: FormField,

    /// Last validation message, shown inside the form until the next submit.
    pub notice: Option<String>,
}

impl BookForm {
    /// The add form defaults: empty text, current year, zero price.
    #[must_use]
    pub fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            published_year: current_year.to_string(),
            price: "0".to_string(),
            focus: FormField::Title,
            notice: None,
        }
    }

    /// A form holding the current values of `book`.
    #[must_use]
    pub fn seeded(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            published_year: book.published_year.to_string(),
            price: format_price(book.price),
            focus: FormField::Title,
            notice: None,
        }
    }

    /// Returns the text currently held by `field`.
    ///
    /// # Parameters
    ///
    /// * `field` - Which of the four buffers to read
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookdesk::app::{BookForm, FormField};
    ///
    /// let form = BookForm::blank(2025);
    /// assert_eq!(form.value(FormField::PublishedYear), "2025");
    /// assert_eq!(form.value(FormField::Price), "0");
    /// ```
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::PublishedYear => &self.published_year,
            FormField::Price => &self.price,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Author => &mut self.author,
            FormField::PublishedYear => &mut self.published_year,
            FormField::Price => &mut self.price,
        }
    }

    /// Appends `c` to the focused field.
    ///
    /// No filtering happens here: a letter typed into the year field is
    /// kept and reported by [`parse`](Self::parse) on submit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookdesk::app::{BookForm, FormField};
    ///
    /// let mut form = BookForm::blank(2025);
    /// form.push_char('E');
    /// form.focus_next();
    /// form.push_char('A');
    /// assert_eq!(form.value(FormField::Title), "E");
    /// assert_eq!(form.value(FormField::Author), "A");
    /// ```
    pub fn push_char(&mut self, c: char) {
        let focus = self.focus;
        self.value_mut(focus).push(c);
    }

    /// Removes the last character of the focused field. Does nothing on an
    /// empty field.
    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    /// Moves focus to the next field, wrapping from price back to title.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus to the previous field, wrapping from title to price.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Parses the text buffers into a draft.
    ///
    /// Only checks that the numeric fields are finite numbers; field rules
    /// live on [`BookDraft`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotANumber`] naming the first bad field.
    pub fn parse(&self) -> Result<BookDraft, ValidationError> {
        let published_year = self
            .published_year
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::NotANumber {
                field: FormField::PublishedYear.label(),
            })?;

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or(ValidationError::NotANumber {
                field: FormField::Price.label(),
            })?;

        Ok(BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            published_year,
            price,
        })
    }
}

/// An open edit modal: the book being edited and the working copy.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub original: Book,
    pub form: BookForm,
}

impl EditSession {
    /// Starts editing `book`, seeding the form from its current values.
    ///
    /// Opening always reseeds, so edits discarded earlier never reappear.
    #[must_use]
    pub fn open(book: &Book) -> Self {
        Self {
            original: book.clone(),
            form: BookForm::seeded(book),
        }
    }

    /// Id of the book being edited; the target of the update call.
    #[must_use]
    pub const fn book_id(&self) -> &BookId {
        &self.original.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_defaults() {
        let form = BookForm::blank(2025);
        assert_eq!(form.published_year, "2025");
        assert_eq!(form.price, "0");
        assert!(form.title.is_empty());
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = BookForm::blank(2025);
        form.push_char('D');
        form.focus_next();
        form.push_char('H');
        form.focus_prev();
        form.push_char('u');
        form.backspace();

        assert_eq!(form.title, "D");
        assert_eq!(form.author, "H");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = BookForm::blank(2025);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Price);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn seeded_form_round_trips_values() {
        let book = Book {
            id: BookId::new("1"),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            published_year: 1965,
            price: 10.0,
        };
        let form = BookForm::seeded(&book);

        assert_eq!(form.price, "10");
        assert_eq!(form.parse().unwrap(), book.draft());
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        let mut form = BookForm::blank(2025);
        form.published_year = "19x5".to_string();
        assert_eq!(
            form.parse(),
            Err(ValidationError::NotANumber { field: "Published year" })
        );

        form.published_year = " 1965 ".to_string();
        form.price = "NaN".to_string();
        assert_eq!(form.parse(), Err(ValidationError::NotANumber { field: "Price" }));
    }
}
