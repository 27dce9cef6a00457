use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title_zh: String,

    pub title_en: String,

    pub content_zh: String,

    pub content_en: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub category_id: Option<String>,

    pub author_id: Option<String>,

    pub is_published: bool,

    /// Set when the article is published, cleared when it is unpublished.
    pub published_at: Option<String>,

    pub meta_title_zh: Option<String>,

    pub meta_title_en: Option<String>,

    pub meta_description_zh: Option<String>,

    pub meta_description_en: Option<String>,

    pub meta_keywords_zh: Option<String>,

    pub meta_keywords_en: Option<String>,

    /// Open Graph preview image URL.
    pub og_image: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::article_categories::Entity",
        from = "Column::CategoryId",
        to = "super::article_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ArticleCategories,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,
}

impl Related<super::article_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleCategories.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
