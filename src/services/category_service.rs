use std::collections::{HashMap, HashSet};

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::Actor,
    dto::catalog::{CategoryNode, CreateCategoryRequest, UpdateCategoryRequest},
    entity::categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    state::AppState,
    validation,
};

pub async fn create_category(
    state: &AppState,
    actor: &Actor,
    payload: CreateCategoryRequest,
) -> AppResult<CategoryModel> {
    validation::required("name", &payload.name, 100)?;
    validation::slug(&payload.slug)?;
    validation::optional("tags", payload.tags.as_deref(), 100)?;
    validation::optional("pic", payload.pic.as_deref(), 255)?;
    if let Some(parent_id) = payload.parent_id {
        ensure_parent_exists(&state.orm, parent_id).await?;
    }

    let category = ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name),
        slug: Set(payload.slug),
        description: Set(payload.description),
        pic: Set(payload.pic),
        parent_id: Set(payload.parent_id),
        tags: Set(payload.tags),
        display_order: Set(payload.display_order),
        is_active: Set(payload.is_active),
        is_expanded: Set(payload.is_expanded),
        created_on: NotSet,
        modified_on: NotSet,
        created_by: Set(actor.id()),
        modified_by: Set(actor.id()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(category_id = %category.id, slug = %category.slug, "category created");
    Ok(category)
}

pub async fn get_category(state: &AppState, id: Uuid) -> AppResult<CategoryModel> {
    Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn find_by_slug(state: &AppState, slug: &str) -> AppResult<CategoryModel> {
    Categories::find()
        .filter(Column::Slug.eq(slug))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_category(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<CategoryModel> {
    let existing = get_category(state, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        validation::required("name", &name, 100)?;
        active.name = Set(name);
    }
    if let Some(slug) = payload.slug {
        validation::slug(&slug)?;
        active.slug = Set(slug);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(pic) = payload.pic {
        validation::max_len("pic", &pic, 255)?;
        active.pic = Set(Some(pic));
    }
    if let Some(tags) = payload.tags {
        validation::max_len("tags", &tags, 100)?;
        active.tags = Set(Some(tags));
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(is_expanded) = payload.is_expanded {
        active.is_expanded = Set(is_expanded);
    }
    active.modified_by = Set(actor.id());

    let category = active.update(&state.orm).await?;
    tracing::info!(category_id = %category.id, "category updated");
    Ok(category)
}

/// Re-parents a category. `None` makes it a root.
///
/// The cycle check and the write share one transaction, and every category row
/// is locked for update first, so two crossing moves cannot both pass.
pub async fn move_category(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    new_parent: Option<Uuid>,
) -> AppResult<CategoryModel> {
    let txn = state.orm.begin().await?;
    let all = Categories::find()
        .order_by_asc(Column::Id)
        .lock(LockType::Update)
        .all(&txn)
        .await?;
    let parents: HashMap<Uuid, Option<Uuid>> = all.iter().map(|c| (c.id, c.parent_id)).collect();
    if !parents.contains_key(&id) {
        return Err(AppError::NotFound);
    }
    if let Some(parent_id) = new_parent {
        if !parents.contains_key(&parent_id) {
            return Err(AppError::validation(format!(
                "parent category {parent_id} does not exist"
            )));
        }
        if would_create_cycle(&parents, id, parent_id) {
            tracing::warn!(category_id = %id, parent_id = %parent_id, "category move rejected");
            return Err(AppError::validation(
                "a category cannot be moved under itself or one of its descendants",
            ));
        }
    }

    let existing = all
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(AppError::NotFound)?;
    let mut active: ActiveModel = existing.into();
    active.parent_id = Set(new_parent);
    active.modified_by = Set(actor.id());
    let category = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(category_id = %category.id, parent_id = ?category.parent_id, "category moved");
    Ok(category)
}

/// Deletes a category and, through the foreign key, its whole subtree.
pub async fn delete_category(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(category_id = %id, "category deleted");
    Ok(())
}

pub async fn sub_categories(state: &AppState, id: Uuid) -> AppResult<Vec<CategoryModel>> {
    let children = Categories::find()
        .filter(Column::ParentId.eq(id))
        .order_by_asc(Column::DisplayOrder)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?;
    Ok(children)
}

/// Breadcrumb for a category: root first, the category itself last.
pub async fn ancestors(state: &AppState, id: Uuid) -> AppResult<Vec<CategoryModel>> {
    let by_id: HashMap<Uuid, CategoryModel> = load_all(&state.orm)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let chain = ancestor_chain(&by_id, id).ok_or(AppError::NotFound)?;
    Ok(chain)
}

/// The full category forest built from a single read.
pub async fn category_tree(state: &AppState) -> AppResult<Vec<CategoryNode>> {
    let all = load_all(&state.orm).await?;
    Ok(build_tree(all))
}

async fn load_all<C>(db: &C) -> AppResult<Vec<CategoryModel>>
where
    C: ConnectionTrait,
{
    let all = Categories::find()
        .order_by_asc(Column::DisplayOrder)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(all)
}

async fn ensure_parent_exists<C>(db: &C, parent_id: Uuid) -> AppResult<()>
where
    C: ConnectionTrait,
{
    match Categories::find_by_id(parent_id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(AppError::validation(format!(
            "parent category {parent_id} does not exist"
        ))),
    }
}

/// True when `new_parent` is `id` itself or sits below it.
pub fn would_create_cycle(
    parents: &HashMap<Uuid, Option<Uuid>>,
    id: Uuid,
    new_parent: Uuid,
) -> bool {
    let mut seen = HashSet::new();
    let mut cursor = Some(new_parent);
    while let Some(current) = cursor {
        if current == id || !seen.insert(current) {
            return true;
        }
        cursor = parents.get(&current).copied().flatten();
    }
    false
}

fn ancestor_chain(by_id: &HashMap<Uuid, CategoryModel>, id: Uuid) -> Option<Vec<CategoryModel>> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = Some(id);
    while let Some(current) = cursor {
        if !seen.insert(current) {
            break;
        }
        let category = by_id.get(&current)?;
        chain.push(category.clone());
        cursor = category.parent_id;
    }
    chain.reverse();
    Some(chain)
}

/// Builds the forest from rows already sorted by `(display_order, id)`.
pub fn build_tree(categories: Vec<CategoryModel>) -> Vec<CategoryNode> {
    let mut children: HashMap<Option<Uuid>, Vec<CategoryModel>> = HashMap::new();
    for category in categories {
        children.entry(category.parent_id).or_default().push(category);
    }
    attach(&mut children, None)
}

fn attach(
    children: &mut HashMap<Option<Uuid>, Vec<CategoryModel>>,
    parent: Option<Uuid>,
) -> Vec<CategoryNode> {
    let level = children.remove(&parent).unwrap_or_default();
    level
        .into_iter()
        .map(|category| {
            let nested = attach(children, Some(category.id));
            CategoryNode {
                category,
                children: nested,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn category(name: &str, parent_id: Option<Uuid>, display_order: i32) -> CategoryModel {
        let now = Utc::now().fixed_offset();
        CategoryModel {
            id: Uuid::now_v7(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            pic: None,
            parent_id,
            tags: None,
            display_order,
            is_active: true,
            is_expanded: false,
            created_on: now,
            modified_on: now,
            created_by: None,
            modified_by: None,
        }
    }

    #[test]
    fn tree_nests_children_under_parents_in_input_order() {
        let root = category("Apparel", None, 0);
        let shoes = category("Shoes", Some(root.id), 0);
        let shirts = category("Shirts", Some(root.id), 1);
        let boots = category("Boots", Some(shoes.id), 0);
        let other = category("Books", None, 1);

        let tree = build_tree(vec![
            root.clone(),
            other.clone(),
            shoes.clone(),
            shirts.clone(),
            boots.clone(),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].category.id, root.id);
        assert_eq!(tree[1].category.id, other.id);
        let names: Vec<_> = tree[0].children.iter().map(|n| n.category.name.as_str()).collect();
        assert_eq!(names, ["Shoes", "Shirts"]);
        assert_eq!(tree[0].children[0].children[0].category.id, boots.id);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn cycle_detection() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let c = Uuid::now_v7();
        let d = Uuid::now_v7();
        let parents = HashMap::from([(a, None), (b, Some(a)), (c, Some(b)), (d, None)]);

        assert!(would_create_cycle(&parents, a, a));
        assert!(would_create_cycle(&parents, a, c));
        assert!(!would_create_cycle(&parents, c, a));
        assert!(!would_create_cycle(&parents, a, d));
    }

    #[test]
    fn ancestor_chain_is_root_first() {
        let root = category("Apparel", None, 0);
        let shoes = category("Shoes", Some(root.id), 0);
        let boots = category("Boots", Some(shoes.id), 0);
        let by_id: HashMap<_, _> = [root.clone(), shoes.clone(), boots.clone()]
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let chain = ancestor_chain(&by_id, boots.id).unwrap();
        let ids: Vec<_> = chain.iter().map(|c| c.id).collect();
        assert_eq!(ids, [root.id, shoes.id, boots.id]);
        assert!(ancestor_chain(&by_id, Uuid::now_v7()).is_none());
    }
}
