use anyhow::Result;
use async_trait::async_trait;

use super::object_name::ObjectName;
use super::types::{AttributeInfo, MBeanValue, StatsNode};

/// Операции generic JMX сессии, нужные чекеру.
///
/// За трейтом живёт реальный клиент бриджа, в тестах — заглушка с
/// подготовленными значениями.
#[async_trait]
pub trait JmxSession: Send + Sync {
    /// Читает значение атрибута объекта.
    async fn get_attribute(&self, object: &ObjectName, attribute: &str) -> Result<MBeanValue>;

    /// Перечисляет объекты, видимые в сессии. Без фильтра — все.
    async fn query_objects(&self, filter: Option<&str>) -> Result<Vec<ObjectName>>;

    /// Перечисляет атрибуты объекта.
    async fn list_attributes(&self, object: &ObjectName) -> Result<Vec<AttributeInfo>>;
}

/// Операции vendor admin подключения, нужные резолверу PMI статистики.
#[async_trait]
pub trait VendorSession: Send + Sync {
    /// Ищет объекты по шаблону имени.
    async fn query_names(&self, pattern: &str) -> Result<Vec<ObjectName>>;

    /// Дерево статистики одного объекта (getStatsObject). None — статистики нет.
    async fn stats_object(
        &self,
        perf: &ObjectName,
        target: &ObjectName,
    ) -> Result<Option<StatsNode>>;

    /// Массив контейнеров статистики для JDBC драйвера (getStatsArray).
    async fn stats_array(&self, perf: &ObjectName, driver: &str) -> Result<Vec<StatsNode>>;
}
