// 启动时写入的默认数据：分类、三档月度套餐和欢迎通知

use chrono::{Duration, Utc};

use super::DomainStore;
use crate::models::{Notification, NotificationKind, SubscriptionPlan};

const DEFAULT_CATEGORIES: [&str; 4] = ["Biryani", "Snacks", "Drinks", "Desserts"];

fn features(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl DomainStore {
    /// 写入默认数据，订阅人数全部为 0
    pub(super) fn seed_defaults(&mut self) {
        for category in DEFAULT_CATEGORIES {
            if !self.categories.iter().any(|c| c == category) {
                self.categories.push(category.to_string());
            }
        }

        let plans = [
            (
                "Basic Plan",
                1299.0,
                false,
                "Perfect for students with light appetite",
                features(&[
                    "2 meals/day (Breakfast + Lunch)",
                    "Monday to Friday access",
                    "Basic menu selection",
                    "Mobile app access",
                    "Customer support",
                ]),
            ),
            (
                "Premium Plan",
                1999.0,
                true,
                "Most popular choice for active students",
                features(&[
                    "3 meals/day (All meals)",
                    "All-week access (7 days)",
                    "Premium menu options",
                    "Priority customer support",
                    "Meal customization",
                    "Free delivery",
                ]),
            ),
            (
                "Ultimate Plan",
                2999.0,
                false,
                "Complete food solution for serious foodies",
                features(&[
                    "Unlimited meals",
                    "All-week access (7 days)",
                    "Premium + exclusive dishes",
                    "Priority customer support",
                    "Meal customization",
                    "Free delivery",
                    "Guest meal vouchers (5/month)",
                    "Nutrition tracking",
                ]),
            ),
        ];
        for (name, price, popular, description, features) in plans {
            let id = self.allocate_id();
            self.subscription_plans.push(SubscriptionPlan {
                id,
                name: name.to_string(),
                price,
                period: "month".to_string(),
                popular,
                description: description.to_string(),
                features,
                subscribers: 0,
            });
        }

        let now = Utc::now();
        let welcome = [
            (
                "Welcome to Hippie Panda! 🎉",
                "Explore our delicious menu and start ordering your favorite meals.",
                NotificationKind::Info,
                Duration::zero(),
            ),
            (
                "Student Discount Available",
                "Get 20% off on all subscription plans with your student ID.",
                NotificationKind::Success,
                Duration::hours(1),
            ),
            (
                "New Menu Items Added",
                "Check out our latest additions to the menu in the Biryani section.",
                NotificationKind::Info,
                Duration::hours(2),
            ),
        ];
        // 按时间从新到旧排列
        for (title, message, kind, age) in welcome {
            let id = self.allocate_id();
            self.notifications.push(Notification {
                id,
                title: title.to_string(),
                message: message.to_string(),
                kind,
                read: false,
                timestamp: now - age,
            });
        }

        tracing::debug!(
            "默认数据已写入: {} 个分类, {} 个套餐, {} 条通知",
            self.categories.len(),
            self.subscription_plans.len(),
            self.notifications.len()
        );
    }
}
