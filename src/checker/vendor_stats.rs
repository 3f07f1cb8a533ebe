use tracing::{debug, info};

use super::error::CheckError;
use crate::jmx::{ObjectName, StatsNode, VendorSession};

/// Sentinel для неизвестного атрибута — наследие существующих конфигураций
/// мониторинга, менять нельзя
pub const UNKNOWN_ATTRIBUTE_VALUE: &str = "-99999";

const THREAD_POOL_ATTRIBUTES: &[&str] = &["ActiveCount", "PoolSize"];
const JDBC_ATTRIBUTES: &[&str] = &["FreePoolSize", "PoolSize", "PercentUsed"];

/// Разрешает vendor путь вида `node.process.category...` в значение
/// статистики.
///
/// Путь режется по буквальной точке, без экранирования — контракт этого
/// бэкенда уже, чем у кодека путей. Отсутствие объекта или незнакомый
/// селектор дают sentinel значение, а не ошибку; ошибкой считается только
/// сбой удалённого вызова.
pub async fn resolve<S: VendorSession + ?Sized>(
    client: &S,
    object_name_base: &str,
    segments: &[&str],
) -> Result<String, CheckError> {
    if segments.len() < 3 {
        return Err(CheckError::Resolution("attribute is not right.".to_string()));
    }

    let node = segments[0];
    let process = segments[1];
    let category = segments[2];

    let perf_pattern = format!("{},process={},node={}", object_name_base, process, node);
    let perf_names = client
        .query_names(&perf_pattern)
        .await
        .map_err(CheckError::resolution)?;

    let Some(perf) = perf_names.into_iter().next() else {
        info!("Perf MBean не найден по шаблону '{}'", perf_pattern);
        return Ok(String::new());
    };

    match category {
        "ThreadPool" => thread_pool_value(client, &perf, node, process, segments).await,
        "JDBC" => jdbc_value(client, &perf, segments).await,
        // Незнакомая категория — ничего не ищем
        _ => Ok(String::new()),
    }
}

/// `node.process.ThreadPool.<poolType>.<attribute>.<metric>`
async fn thread_pool_value<S: VendorSession + ?Sized>(
    client: &S,
    perf: &ObjectName,
    node: &str,
    process: &str,
    segments: &[&str],
) -> Result<String, CheckError> {
    if segments.len() != 6 {
        return Err(CheckError::Resolution(
            "ThreadPool path requires <node>.<process>.ThreadPool.<pool>.<attribute>.<metric>"
                .to_string(),
        ));
    }

    let pool_type = segments[3];
    let attribute = segments[4];
    let metric = segments[5];

    let pattern = format!(
        "WebSphere:*,type=ThreadPool,process={},node={}",
        process, node
    );
    let pools = client
        .query_names(&pattern)
        .await
        .map_err(CheckError::resolution)?;

    // Первый пул с совпавшим (без учёта регистра) именем; нет — пустое
    // значение, не ошибка
    let pool = pools.iter().find(|p| {
        p.key_property("name")
            .map(|n| n.eq_ignore_ascii_case(pool_type))
            .unwrap_or(false)
    });

    let Some(pool) = pool else {
        info!("ThreadPool MBean '{}' не найден", pool_type);
        return Ok(String::new());
    };

    let stats = client
        .stats_object(perf, pool)
        .await
        .map_err(CheckError::resolution)?;

    let Some(stats) = stats else {
        debug!("Нет статистики для '{}'", pool);
        return Ok(String::new());
    };

    Ok(range_value(&stats, attribute, metric, THREAD_POOL_ATTRIBUTES))
}

/// `node.process.JDBC.<driver>.<dataSource>.<attribute>.<metric>`
async fn jdbc_value<S: VendorSession + ?Sized>(
    client: &S,
    perf: &ObjectName,
    segments: &[&str],
) -> Result<String, CheckError> {
    if segments.len() != 7 {
        return Err(CheckError::Resolution(
            "JDBC path requires <node>.<process>.JDBC.<driver>.<dataSource>.<attribute>.<metric>"
                .to_string(),
        ));
    }

    let driver = segments[3];
    let data_source = segments[4];
    let attribute = segments[5];
    let metric = segments[6];

    let containers = client
        .stats_array(perf, driver)
        .await
        .map_err(CheckError::resolution)?;

    // Первый контейнер с совпавшим data source, дальше не сканируем
    for container in &containers {
        for sub in &container.sub_stats {
            if sub.name == data_source {
                return Ok(range_value(sub, attribute, metric, JDBC_ATTRIBUTES));
            }
        }
    }

    debug!("Data source '{}' не найден у драйвера '{}'", data_source, driver);
    Ok(String::new())
}

/// Выбор статистики и метрики с sentinel политикой: неизвестный атрибут —
/// "-99999", неизвестная метрика или отсутствующая статистика — пустая
/// строка.
fn range_value(stats: &StatsNode, attribute: &str, metric: &str, known: &[&str]) -> String {
    if !known.contains(&attribute) {
        return UNKNOWN_ATTRIBUTE_VALUE.to_string();
    }

    let Some(statistic) = stats.statistic(attribute) else {
        return String::new();
    };

    match metric {
        "current" => statistic.current.to_string(),
        "max" => statistic.high_water_mark.to_string(),
        _ => String::new(),
    }
}
