//! Menu options and the product category table.
//!
//! A menu option is only an identifier: pressing a button sends its
//! callback data, which parses back into a [`MenuOption`]. Labels come from
//! the message catalog or the category table.

use serde::{Deserialize, Serialize};

const CATEGORY_PREFIX: &str = "category_";

/// A button the user can press in one of the inline keyboards
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuOption {
    Category(String),
    OtherItems,
    Help,
    Contacts,
    NewsFeed,
    Back,
    ProductSelection,
    Cancel,
}

impl MenuOption {
    /// Parse inline keyboard callback data
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(id) = data.strip_prefix(CATEGORY_PREFIX) {
            return Some(MenuOption::Category(id.to_string()));
        }
        match data {
            "other_items" => Some(MenuOption::OtherItems),
            "help" => Some(MenuOption::Help),
            "contacts" => Some(MenuOption::Contacts),
            "news_feed" => Some(MenuOption::NewsFeed),
            "back_to_main" => Some(MenuOption::Back),
            "product_selection" => Some(MenuOption::ProductSelection),
            "cancel" => Some(MenuOption::Cancel),
            _ => None,
        }
    }

    /// Callback data carried by the button for this option
    pub fn callback_data(&self) -> String {
        match self {
            MenuOption::Category(id) => format!("{CATEGORY_PREFIX}{id}"),
            MenuOption::OtherItems => "other_items".to_string(),
            MenuOption::Help => "help".to_string(),
            MenuOption::Contacts => "contacts".to_string(),
            MenuOption::NewsFeed => "news_feed".to_string(),
            MenuOption::Back => "back_to_main".to_string(),
            MenuOption::ProductSelection => "product_selection".to_string(),
            MenuOption::Cancel => "cancel".to_string(),
        }
    }
}

/// A product category shown in the main menu
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    /// Search advice shown after selection; the generic hint is used when absent
    pub hint: Option<String>,
}

impl Category {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

/// The category table the service ships with
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("auto", "Автомобильные товары")
            .with_hint("укажите VIN, номер кузова, марку, модель, год. Это ускорит поиск!"),
        Category::new("moto", "Мотоциклы и питбайки"),
        Category::new("toys", "Игрушки"),
        Category::new("bags", "Сумки"),
        Category::new("clothes", "Одежда"),
        Category::new("sport", "Спортивный инвентарь"),
        Category::new("electronics", "Электроника"),
        Category::new("appliances", "Бытовая техника"),
        Category::new("decor", "Домашний декор"),
        Category::new("beauty", "Красота и здоровье"),
        Category::new("jewelry", "Ювелирка и аксессуары"),
        Category::new("tools", "Инструменты и оборудование"),
        Category::new("office", "Офисные товары"),
        Category::new("kids", "Детские товары"),
        Category::new("machinery", "Станки и механизмы"),
    ]
}
