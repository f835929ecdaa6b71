// 订阅套餐操作

use super::DomainStore;
use crate::error::{StoreError, StoreResult};
use crate::event_bus::AppEvent;
use crate::models::{
    NewNotification, NewSubscriptionPlan, NotificationKind, SubscriptionPlan,
    SubscriptionPlanPatch,
};
use crate::utils::validation;

impl DomainStore {
    pub fn subscription_plans(&self) -> &[SubscriptionPlan] {
        &self.subscription_plans
    }

    pub fn subscription_plan(&self, id: i64) -> Option<&SubscriptionPlan> {
        self.subscription_plans.iter().find(|plan| plan.id == id)
    }

    /// 新增套餐，订阅人数强制为 0
    pub fn add_subscription_plan(
        &mut self,
        new: NewSubscriptionPlan,
    ) -> StoreResult<SubscriptionPlan> {
        validation::validate_new_plan(&new)?;

        let plan = SubscriptionPlan {
            id: self.allocate_id(),
            name: new.name.trim().to_string(),
            price: new.price,
            period: new.period,
            popular: new.popular,
            description: new.description,
            features: new.features,
            subscribers: 0,
        };
        self.subscription_plans.push(plan.clone());
        tracing::debug!("新增套餐: {} ({})", plan.name, plan.id);
        self.record(AppEvent::SubscriptionPlanAdded { plan: plan.clone() });
        Ok(plan)
    }

    /// 合并字段到指定套餐，ID不存在时返回 `Ok(None)`
    pub fn update_subscription_plan(
        &mut self,
        id: i64,
        patch: SubscriptionPlanPatch,
    ) -> StoreResult<Option<SubscriptionPlan>> {
        let Some(index) = self.subscription_plans.iter().position(|plan| plan.id == id) else {
            return Ok(None);
        };
        validation::validate_plan_patch(&patch)?;

        let plan = &mut self.subscription_plans[index];
        patch.apply_to(plan);
        let updated = plan.clone();
        self.record(AppEvent::SubscriptionPlanUpdated {
            plan: updated.clone(),
        });
        Ok(Some(updated))
    }

    /// 删除套餐
    ///
    /// 仍有订阅用户时返回 [`StoreError::PlanHasSubscribers`]；ID不存在时返回 `Ok(None)`
    pub fn delete_subscription_plan(&mut self, id: i64) -> StoreResult<Option<SubscriptionPlan>> {
        let Some(index) = self.subscription_plans.iter().position(|plan| plan.id == id) else {
            return Ok(None);
        };

        let subscribers = self.subscription_plans[index].subscribers;
        if subscribers > 0 {
            tracing::warn!("套餐 {} 还有 {} 位订阅用户，拒绝删除", id, subscribers);
            return Err(StoreError::PlanHasSubscribers {
                plan_id: id,
                subscribers,
            });
        }

        let removed = self.subscription_plans.remove(index);
        self.record(AppEvent::SubscriptionPlanDeleted { id });
        Ok(Some(removed))
    }

    /// 订阅套餐，订阅人数加一并生成一条 info 通知
    pub fn subscribe_to_plan(&mut self, id: i64) -> Option<SubscriptionPlan> {
        let plan = self.subscription_plans.iter_mut().find(|plan| plan.id == id)?;
        plan.subscribers = plan.subscribers.saturating_add(1);
        let plan = plan.clone();
        self.record(AppEvent::SubscriptionPlanUpdated { plan: plan.clone() });

        self.add_notification(NewNotification::new(
            NotificationKind::Info,
            "Subscription Activated",
            format!(
                "You are now subscribed to {} (₹{}/{}).",
                plan.name, plan.price, plan.period
            ),
        ));
        Some(plan)
    }

    /// 取消订阅，订阅人数最低为 0
    pub fn unsubscribe_from_plan(&mut self, id: i64) -> Option<SubscriptionPlan> {
        let plan = self.subscription_plans.iter_mut().find(|plan| plan.id == id)?;
        if plan.subscribers == 0 {
            return Some(plan.clone());
        }
        plan.subscribers -= 1;
        let plan = plan.clone();
        self.record(AppEvent::SubscriptionPlanUpdated { plan: plan.clone() });
        Some(plan)
    }

    pub fn total_subscribers(&self) -> u32 {
        self.subscription_plans
            .iter()
            .fold(0u32, |sum, plan| sum.saturating_add(plan.subscribers))
    }

    /// 月收入 = Σ 价格 × 订阅人数
    pub fn monthly_revenue(&self) -> f64 {
        self.subscription_plans
            .iter()
            .map(|plan| plan.price * f64::from(plan.subscribers))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_plan(name: &str, price: f64, subscribers: u32) -> NewSubscriptionPlan {
        NewSubscriptionPlan {
            name: name.to_string(),
            price,
            period: "month".to_string(),
            popular: false,
            description: String::new(),
            features: vec!["Free delivery".to_string()],
            subscribers,
        }
    }

    #[test]
    fn test_new_plan_always_starts_with_zero_subscribers() {
        let mut store = DomainStore::default();
        let plan = store.add_subscription_plan(new_plan("Test", 999.0, 42)).unwrap();

        assert_eq!(plan.subscribers, 0);
        assert_eq!(store.subscription_plan(plan.id).map(|p| p.subscribers), Some(0));
    }

    #[test]
    fn test_new_plan_validation() {
        let mut store = DomainStore::default();
        assert_eq!(
            store.add_subscription_plan(new_plan("", 999.0, 0)),
            Err(StoreError::EmptyName)
        );
        assert_eq!(
            store.add_subscription_plan(new_plan("Test", -1.0, 0)),
            Err(StoreError::InvalidPrice(-1.0))
        );
    }

    #[test]
    fn test_update_plan_toggles_popular() {
        let mut store = DomainStore::default();
        let basic = store.subscription_plans()[0].clone();

        let updated = store
            .update_subscription_plan(
                basic.id,
                SubscriptionPlanPatch {
                    popular: Some(!basic.popular),
                    price: Some(1399.0),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.popular, !basic.popular);
        assert_eq!(updated.price, 1399.0);
        assert_eq!(updated.features, basic.features);
        assert_eq!(store.update_subscription_plan(-5, SubscriptionPlanPatch::default()), Ok(None));
    }

    #[test]
    fn test_delete_plan_with_subscribers_is_refused() {
        let mut store = DomainStore::default();
        let id = store.subscription_plans()[1].id;
        store.subscribe_to_plan(id);

        assert_eq!(
            store.delete_subscription_plan(id),
            Err(StoreError::PlanHasSubscribers {
                plan_id: id,
                subscribers: 1
            })
        );
        assert_eq!(store.subscription_plans().len(), 3);

        store.unsubscribe_from_plan(id);
        let removed = store.delete_subscription_plan(id).unwrap();
        assert_eq!(removed.map(|p| p.id), Some(id));
        assert_eq!(store.subscription_plans().len(), 2);
        assert_eq!(store.delete_subscription_plan(id), Ok(None));
    }

    #[test]
    fn test_subscribe_adds_notification_and_revenue() {
        let mut store = DomainStore::default();
        let premium = store.subscription_plans()[1].id;
        let ultimate = store.subscription_plans()[2].id;

        store.subscribe_to_plan(premium);
        store.subscribe_to_plan(premium);
        store.subscribe_to_plan(ultimate);

        assert_eq!(store.total_subscribers(), 3);
        assert_eq!(store.monthly_revenue(), 1999.0 * 2.0 + 2999.0);
        assert!(store.notifications()[0].message.contains("Ultimate Plan"));
    }

    #[test]
    fn test_unsubscribe_saturates_at_zero() {
        let mut store = DomainStore::default();
        let id = store.subscription_plans()[0].id;
        let plan = store.unsubscribe_from_plan(id).unwrap();
        assert_eq!(plan.subscribers, 0);
        assert!(store.unsubscribe_from_plan(12345).is_none());
    }
}
