use crate::api::User;

pub const CODE_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub active_field: AuthField,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            active_field: AuthField::Email,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.password.clear();
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.active_field {
            AuthField::Email => self.email.push(c),
            AuthField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.active_field {
            AuthField::Email => self.email.pop(),
            AuthField::Password => self.password.pop(),
        };
    }

    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn user(&self) -> User {
        User::new(self.email.trim(), self.password.clone())
    }

    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

/// One cell per verification digit.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeForm {
    cells: [Option<char>; CODE_LENGTH],
    pub cursor: usize,
}

impl CodeForm {
    pub fn new() -> Self {
        Self {
            cells: [None; CODE_LENGTH],
            cursor: 0,
        }
    }

    /// Fills the current cell and advances. Non-digits are ignored.
    pub fn enter_digit(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if let Some(cell) = self.cells.get_mut(self.cursor) {
            *cell = Some(c);
            self.cursor = (self.cursor + 1).min(CODE_LENGTH - 1);
        }
    }

    /// Clears the current cell, or the previous one when it is already empty.
    pub fn backspace(&mut self) {
        if self.cells[self.cursor].is_none() && self.cursor > 0 {
            self.cursor -= 1;
        }
        self.cells[self.cursor] = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(CODE_LENGTH - 1);
    }

    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Entered digits in cell order, as submitted for verification.
    pub fn digits(&self) -> Vec<String> {
        self.cells
            .iter()
            .flatten()
            .map(|c| c.to_string())
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for CodeForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_active_field() {
        let mut form = AuthForm::new();
        form.push_char('a');
        form.next_field();
        form.push_char('x');
        form.push_char('y');
        form.pop_char();

        assert_eq!(form.email, "a");
        assert_eq!(form.password, "x");
        assert_eq!(form.masked_password(), "•");
    }

    #[test]
    fn toggling_mode_clears_password() {
        let mut form = AuthForm::new();
        form.email = "ada@example.com".to_string();
        form.password = "secret".to_string();

        form.toggle_mode();

        assert_eq!(form.mode, AuthMode::Register);
        assert_eq!(form.email, "ada@example.com");
        assert!(form.password.is_empty());
    }

    #[test]
    fn user_trims_email() {
        let mut form = AuthForm::new();
        form.email = "  ada@example.com ".to_string();
        form.password = "pw".to_string();

        let user = form.user();

        assert_eq!(user.email, "ada@example.com");
        assert!(form.is_complete());
    }

    #[test]
    fn code_form_collects_digits_in_order() {
        let mut code = CodeForm::new();
        for c in ['1', 'x', '2', '3', '4'] {
            code.enter_digit(c);
        }

        assert!(code.is_complete());
        assert_eq!(code.digits(), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn code_form_backspace_steps_back_over_empty_cell() {
        let mut code = CodeForm::new();
        code.enter_digit('1');
        code.enter_digit('2');

        code.backspace();

        assert_eq!(code.cells(), &[Some('1'), None, None, None]);
        assert_eq!(code.cursor, 1);
    }

    #[test]
    fn code_form_overwrites_last_cell() {
        let mut code = CodeForm::new();
        for c in ['1', '2', '3', '4', '9'] {
            code.enter_digit(c);
        }

        assert_eq!(code.digits(), vec!["1", "2", "3", "9"]);
    }
}
