use crate::domain::model::UserViewData;
use crate::domain::ports::{DetailRender, ListRender};
use std::fmt;

/// 列表畫面：每位使用者一行
#[derive(Debug, Default)]
pub struct TextListView {
    rows: Vec<String>,
    renders: usize,
}

impl TextListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl ListRender for TextListView {
    fn render(&mut self, users: &[UserViewData]) {
        self.rows = users
            .iter()
            .enumerate()
            .map(|(i, u)| {
                format!(
                    "{:>3}  {:<24} {:<18} {:<28} {:<16} {}",
                    i, u.name, u.username, u.email, u.address, u.company
                )
            })
            .collect();
        self.renders += 1;
    }
}

impl fmt::Display for TextListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "(no users)");
        }
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// 詳細畫面：各欄位標籤
#[derive(Debug, Default)]
pub struct TextDetailView {
    pub name: String,
    pub username: String,
    pub email: String,
    pub city: String,
    pub company: String,
    renders: usize,
}

impl TextDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl DetailRender for TextDetailView {
    fn render(&mut self, user: &UserViewData) {
        self.name = user.name.clone();
        self.username = user.username.clone();
        self.email = user.email.clone();
        self.city = user.address.clone();
        self.company = user.company.clone();
        self.renders += 1;
    }
}

impl fmt::Display for TextDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:     {}", self.name)?;
        writeln!(f, "Username: {}", self.username)?;
        writeln!(f, "Email:    {}", self.email)?;
        writeln!(f, "City:     {}", self.city)?;
        writeln!(f, "Company:  {}", self.company)
    }
}
