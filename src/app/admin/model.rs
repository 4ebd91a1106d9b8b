//! 商品数据模型
//!
//! 商品记录是一个开放的 JSON 对象：已知字段只在创建时补默认值，
//! 不做类型校验，客户端提交的其他字段原样保存。

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// 未提供名称时使用的默认名称
pub const DEFAULT_NAME: &str = "Untitled";

/// 商品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

/// 创建或更新商品的请求体，必须是 JSON 对象
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ProductInput(Map<String, Value>);

impl Product {
    /// 记录中的整数 ID；缺失或不是非负整数时为 `None`
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// 与 JavaScript 的假值判断一致：null、false、0、NaN 和空字符串
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl ProductInput {
    /// 以给定 ID 生成新商品，已知字段为假值或缺失时填入默认值
    pub fn into_product(self, id: u64) -> Product {
        let mut fields = Map::new();
        fields.insert("id".to_string(), json!(id));
        fields.extend(self.0.into_iter().filter(|(key, _)| key != "id"));

        let defaults = [
            ("name", json!(DEFAULT_NAME)),
            ("price", json!(0)),
            ("description", json!("")),
            ("categories", json!([])),
        ];
        for (key, default) in defaults {
            let keep = fields.get(key).map_or(false, |v| !is_falsy(v));
            if !keep {
                fields.insert(key.to_string(), default);
            }
        }

        Product(fields)
    }

    /// 浅合并到已有商品上，请求体中的 `id` 被忽略
    pub fn apply_to(self, product: &mut Product) {
        product
            .0
            .extend(self.0.into_iter().filter(|(key, _)| key != "id"));
    }
}

/// 下一个商品 ID：现有最大整数 ID 加一，空目录从 1 开始；溢出时为 `None`
pub fn next_id(products: &[Product]) -> Option<u64> {
    match products.iter().filter_map(Product::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
