use rust_decimal::Decimal;
use std::sync::Mutex;
use tabula::Entity;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Blog {
    pub id: i32,
    pub name: String,
}

#[derive(Entity, Debug, Clone, PartialEq)]
#[tabula(name = "posts")]
pub struct Post {
    #[tabula(key)]
    pub blog_id: i32,
    #[tabula(key)]
    pub post_num: i32,
    pub title: String,
    #[tabula(computed)]
    pub computed_value: Option<i32>,
}

#[derive(Entity, Debug)]
#[tabula(name = "articles", rename_all = "PascalCase")]
pub struct Article {
    #[tabula(key, generated = "none")]
    pub id: Uuid,
    #[tabula(name = "headline")]
    pub title: String,
    pub published_at: Option<PrimitiveDateTime>,
    pub price: Option<Decimal>,
    #[tabula(ignore)]
    pub word_count: Mutex<usize>,
}

#[derive(Entity, Debug, Clone, PartialEq)]
#[tabula(name = "cells")]
pub struct Cell {
    #[tabula(key)]
    pub row: i32,
    #[tabula(key)]
    pub col: i32,
    pub text: String,
}

#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Shape {
    pub shape_id: i64,
    pub r#type: String,
}
