// 菜单与分类操作

use std::cmp::Ordering;

use super::DomainStore;
use crate::error::{StoreError, StoreResult};
use crate::event_bus::AppEvent;
use crate::models::{
    MenuItem, MenuItemPatch, MenuQuery, MenuSort, NewMenuItem, NewNotification, NotificationKind,
};
use crate::utils::validation;

/// 分类过滤中表示"全部"的取值
const ALL_CATEGORIES: &str = "All";

impl DomainStore {
    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn menu_item(&self, id: i64) -> Option<&MenuItem> {
        self.menu_items.iter().find(|item| item.id == id)
    }

    /// 新增菜品
    ///
    /// 分配新ID并追加到菜单末尾，同时生成一条 success 通知
    pub fn add_menu_item(&mut self, new: NewMenuItem) -> StoreResult<MenuItem> {
        validation::validate_new_menu_item(&new, &self.categories)?;

        let image_url = if new.image_url.trim().is_empty() {
            self.default_image_url.clone()
        } else {
            new.image_url
        };
        let item = MenuItem {
            id: self.allocate_id(),
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            price: new.price,
            description: new.description,
            image_url,
            is_veg: new.is_veg,
        };
        self.menu_items.push(item.clone());
        tracing::debug!("新增菜品: {} ({})", item.name, item.id);
        self.record(AppEvent::MenuItemAdded { item: item.clone() });

        self.add_notification(NewNotification::new(
            NotificationKind::Success,
            "New Menu Item Added",
            format!(
                "{} has been added to the {} section.",
                item.name, item.category
            ),
        ));

        Ok(item)
    }

    /// 合并字段到指定菜品，ID不存在时返回 `Ok(None)` 且不做任何修改
    pub fn update_menu_item(
        &mut self,
        id: i64,
        patch: MenuItemPatch,
    ) -> StoreResult<Option<MenuItem>> {
        let Some(index) = self.menu_items.iter().position(|item| item.id == id) else {
            return Ok(None);
        };
        validation::validate_menu_item_patch(&patch, &self.categories)?;

        let item = &mut self.menu_items[index];
        patch.apply_to(item);
        let updated = item.clone();
        self.record(AppEvent::MenuItemUpdated {
            item: updated.clone(),
        });
        Ok(Some(updated))
    }

    /// 删除菜品，并级联删除购物车中引用该菜品的所有行
    pub fn delete_menu_item(&mut self, id: i64) -> Option<MenuItem> {
        let index = self.menu_items.iter().position(|item| item.id == id)?;
        let removed = self.menu_items.remove(index);
        self.record(AppEvent::MenuItemDeleted { id });

        let before = self.cart_items.len();
        self.cart_items.retain(|row| row.id() != id);
        if self.cart_items.len() != before {
            let summary = self.cart_summary();
            self.record(AppEvent::CartUpdated { summary });
        }

        self.add_notification(NewNotification::new(
            NotificationKind::Warning,
            "Menu Item Removed",
            format!("{} has been removed from the menu.", removed.name),
        ));
        Some(removed)
    }

    /// 新增分类，已存在时不重复插入，返回是否插入
    pub fn add_category(&mut self, name: &str) -> StoreResult<bool> {
        let name = name.trim();
        validation::validate_name(name)?;
        if self.categories.iter().any(|c| c == name) {
            return Ok(false);
        }
        self.categories.push(name.to_string());
        self.record(AppEvent::CategoryAdded {
            name: name.to_string(),
        });
        Ok(true)
    }

    /// 删除分类
    ///
    /// 仍有菜品使用该分类时返回 [`StoreError::CategoryInUse`]，分类集合保持不变
    pub fn delete_category(&mut self, name: &str) -> StoreResult<bool> {
        let name = name.trim();
        let item_count = self
            .menu_items
            .iter()
            .filter(|item| item.category == name)
            .count();
        if item_count > 0 {
            tracing::warn!("分类 {} 仍有 {} 个菜品，拒绝删除", name, item_count);
            return Err(StoreError::CategoryInUse {
                category: name.to_string(),
                item_count,
            });
        }

        let Some(index) = self.categories.iter().position(|c| c == name) else {
            return Ok(false);
        };
        let removed = self.categories.remove(index);
        self.record(AppEvent::CategoryDeleted { name: removed });
        Ok(true)
    }

    /// 按关键字和分类筛选菜单，并按指定方式排序
    pub fn query_menu(&self, query: &MenuQuery) -> Vec<MenuItem> {
        let needle = query.search.trim().to_lowercase();
        let category = query
            .category
            .as_deref()
            .filter(|c| *c != ALL_CATEGORIES);

        let mut items: Vec<MenuItem> = self
            .menu_items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item.name.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            })
            .filter(|item| category.map_or(true, |c| item.category == c))
            .cloned()
            .collect();

        match query.sort_by {
            MenuSort::Name => items.sort_by(|a, b| compare_text(&a.name, &b.name)),
            MenuSort::Price => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
            MenuSort::Category => items.sort_by(|a, b| compare_text(&a.category, &b.category)),
        }
        items
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{new_item, store_with_categories};
    use super::*;

    #[test]
    fn test_add_menu_item_assigns_unique_ids() {
        let mut store = store_with_categories(&["Biryani"]);
        let a = store.add_menu_item(new_item("Veg Biryani", "Biryani", 199.0)).unwrap();
        let b = store.add_menu_item(new_item("Egg Biryani", "Biryani", 219.0)).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.menu_items().len(), 2);
        assert_eq!(store.menu_items()[1], b);
    }

    #[test]
    fn test_add_menu_item_notifies_with_name_and_category() {
        let mut store = store_with_categories(&["Snacks"]);
        store.add_menu_item(new_item("Samosa", "Snacks", 30.0)).unwrap();

        let latest = &store.notifications()[0];
        assert_eq!(latest.kind, NotificationKind::Success);
        assert!(latest.message.contains("Samosa"));
        assert!(latest.message.contains("Snacks"));
    }

    #[test]
    fn test_add_menu_item_uses_default_image() {
        let mut store = store_with_categories(&["Drinks"]);
        let item = store.add_menu_item(new_item("Lassi", "Drinks", 60.0)).unwrap();
        assert_eq!(item.image_url, crate::models::DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_add_menu_item_rejects_invalid_input() {
        let mut store = store_with_categories(&["Drinks"]);

        assert_eq!(
            store.add_menu_item(new_item("  ", "Drinks", 60.0)),
            Err(StoreError::EmptyName)
        );
        assert_eq!(
            store.add_menu_item(new_item("Lassi", "Drinks", 0.0)),
            Err(StoreError::InvalidPrice(0.0))
        );
        assert_eq!(
            store.add_menu_item(new_item("Lassi", "Pizza", 60.0)),
            Err(StoreError::UnknownCategory("Pizza".to_string()))
        );
        assert!(store.menu_items().is_empty());
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_update_menu_item_merges_fields() {
        let mut store = store_with_categories(&["Snacks", "Desserts"]);
        let item = store.add_menu_item(new_item("Gulab Jamun", "Snacks", 50.0)).unwrap();

        let updated = store
            .update_menu_item(
                item.id,
                MenuItemPatch {
                    category: Some("Desserts".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.category, "Desserts");
        assert_eq!(updated.price, 50.0);
        assert_eq!(store.menu_item(item.id), Some(&updated));
    }

    #[test]
    fn test_update_missing_item_is_noop() {
        let mut store = store_with_categories(&["Snacks"]);
        store.add_menu_item(new_item("Pakora", "Snacks", 40.0)).unwrap();
        let before = store.snapshot();
        store.drain_events();

        let result = store.update_menu_item(
            999,
            MenuItemPatch {
                price: Some(-1.0),
                ..Default::default()
            },
        );

        assert_eq!(result, Ok(None));
        assert_eq!(store.snapshot(), before);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_delete_menu_item_cascades_to_cart() {
        let mut store = store_with_categories(&["Biryani"]);
        let keep = store.add_menu_item(new_item("Veg Biryani", "Biryani", 199.0)).unwrap();
        let gone = store.add_menu_item(new_item("Mutton Biryani", "Biryani", 349.0)).unwrap();
        store.add_to_cart(&keep).unwrap();
        store.add_to_cart(&gone).unwrap();
        store.add_to_cart(&gone).unwrap();

        let removed = store.delete_menu_item(gone.id);

        assert_eq!(removed.map(|i| i.id), Some(gone.id));
        assert!(store.menu_item(gone.id).is_none());
        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.cart_items()[0].id(), keep.id);

        let latest = &store.notifications()[0];
        assert_eq!(latest.kind, NotificationKind::Warning);
        assert!(latest.message.contains("Mutton Biryani"));
    }

    #[test]
    fn test_delete_missing_item_adds_no_notification() {
        let mut store = store_with_categories(&["Biryani"]);
        assert!(store.delete_menu_item(42).is_none());
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_add_existing_category_is_idempotent() {
        let mut store = store_with_categories(&["Biryani", "Snacks"]);
        assert_eq!(store.add_category("Snacks"), Ok(false));
        assert_eq!(store.categories().len(), 2);

        assert_eq!(store.add_category(" Drinks "), Ok(true));
        assert_eq!(store.categories().last().map(String::as_str), Some("Drinks"));
    }

    #[test]
    fn test_delete_category_in_use_is_refused() {
        let mut store = store_with_categories(&["Biryani", "Snacks"]);
        store.add_menu_item(new_item("Veg Biryani", "Biryani", 199.0)).unwrap();

        let result = store.delete_category("Biryani");

        assert_eq!(
            result,
            Err(StoreError::CategoryInUse {
                category: "Biryani".to_string(),
                item_count: 1
            })
        );
        assert_eq!(store.categories(), &["Biryani".to_string(), "Snacks".to_string()]);
    }

    #[test]
    fn test_delete_unused_category() {
        let mut store = store_with_categories(&["Biryani", "Snacks"]);
        assert_eq!(store.delete_category("Snacks"), Ok(true));
        assert_eq!(store.delete_category("Snacks"), Ok(false));
        assert_eq!(store.categories(), &["Biryani".to_string()]);
    }

    #[test]
    fn test_names_are_trimmed_on_every_path() {
        let mut store = store_with_categories(&[" Snacks "]);
        assert_eq!(store.categories(), &["Snacks".to_string()]);

        let item = store
            .add_menu_item(new_item("Samosa", " Snacks ", 30.0))
            .unwrap();
        assert_eq!(item.category, "Snacks");

        let updated = store
            .update_menu_item(
                item.id,
                MenuItemPatch {
                    name: Some("  Aloo Samosa  ".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Aloo Samosa");

        assert!(matches!(
            store.delete_category(" Snacks "),
            Err(StoreError::CategoryInUse { .. })
        ));
        store.delete_menu_item(item.id);
        assert_eq!(store.delete_category(" Snacks "), Ok(true));
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_query_menu_filters_and_sorts() {
        let mut store = store_with_categories(&["Biryani", "Drinks"]);
        store.add_menu_item(new_item("Mango Lassi", "Drinks", 80.0)).unwrap();
        store.add_menu_item(new_item("Chicken Biryani", "Biryani", 249.0)).unwrap();
        store.add_menu_item(new_item("Masala Chai", "Drinks", 49.0)).unwrap();

        let by_name = store.query_menu(&MenuQuery::default());
        let names: Vec<_> = by_name.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken Biryani", "Mango Lassi", "Masala Chai"]);

        let drinks_by_price = store.query_menu(&MenuQuery {
            category: Some("Drinks".to_string()),
            sort_by: MenuSort::Price,
            ..Default::default()
        });
        let names: Vec<_> = drinks_by_price.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Masala Chai", "Mango Lassi"]);

        let search = store.query_menu(&MenuQuery {
            search: "LASSI".to_string(),
            category: Some("All".to_string()),
            ..Default::default()
        });
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].name, "Mango Lassi");
    }

    #[test]
    fn test_query_menu_matches_description() {
        let mut store = store_with_categories(&["Snacks"]);
        let mut item = new_item("Vada Pav", "Snacks", 35.0);
        item.description = "Mumbai street food".to_string();
        store.add_menu_item(item).unwrap();

        let found = store.query_menu(&MenuQuery {
            search: "street".to_string(),
            ..Default::default()
        });
        assert_eq!(found.len(), 1);
    }
}
