// ==========================================
// 表格映射校验引擎 - 动态记录
// ==========================================
// 职责: schema 配置文件驱动时的输出记录（列名 → 字段值）
// 约定: 保持声明顺序; 序列化为 JSON 对象
// ==========================================

use crate::domain::types::FieldValue;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    fields: Vec<(String, FieldValue)>,
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置字段值（已存在则覆盖）
    pub fn set(&mut self, column: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for DynamicRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut record = DynamicRecord::new();
        record.set("Name", FieldValue::Text("John".to_string()));
        record.set("Age", FieldValue::Integer(0));
        record.set("Age", FieldValue::Integer(30));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Age"), Some(&FieldValue::Integer(30)));
        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Name", "Age"]);
    }

    #[test]
    fn test_serialize_keeps_order() {
        let mut record = DynamicRecord::new();
        record.set("b", FieldValue::Null);
        record.set("a", FieldValue::Decimal(3.14));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"b":null,"a":3.14}"#);
    }
}
