use pathconf_core::Configuration;
use pathconf_schema::Expect;
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Database {
    url: String,
    max_connections: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pathconf_core=debug")),
        )
        .init();

    println!("=== 按路径寻址的配置容器示例 ===\n");

    // 1. 注册 schema
    println!("1. 注册 schema:");
    let config = Configuration::builder()
        .schema(
            "database",
            Expect::structure()
                .field("url", Expect::string().required())
                .field("max_connections", Expect::int().min(1.0).default(10)),
        )
        .schema("log_level", Expect::any_of(["debug", "info", "warn", "error"]).default("info"))
        .schema("legacy_mode", Expect::bool().deprecated_with("'%path%' 已废弃，将在下个版本移除"))
        .build()?;
    println!("   已注册: {:?}\n", config.keys());

    // 2. 缺少必填项时读取失败
    println!("2. 缺少必填项:");
    if let Err(err) = config.get("database") {
        println!("   {err}\n");
    }

    // 3. 合并数据后读取
    println!("3. 合并数据:");
    config.merge(json!({
        "database": {"url": "postgresql://localhost:5432/app"},
        "legacy_mode": true,
    }))?;
    println!("   database.url = {}", config.get("database.url")?);
    println!("   database/max_connections = {}", config.get("database/max_connections")?);
    println!("   legacy_mode = {}\n", config.get("legacy_mode")?);

    // 4. 写入单个路径
    println!("4. 写入路径:");
    config.set("database.max_connections", 25)?;
    let database: Database = config.get_as("database")?;
    println!("   {database:?}\n");

    // 5. 只读视图
    println!("5. 只读视图:");
    let reader = config.reader();
    config.set("log_level", "verbose")?;
    match reader.get("log_level") {
        Ok(level) => println!("   log_level = {level}"),
        Err(err) => println!("   {err}"),
    }
    println!("   exists(database.password) = {}\n", reader.exists("database.password")?);

    config.set("log_level", "warn")?;
    println!("6. 完整快照:");
    println!("{}", serde_json::to_string_pretty(&config.snapshot()?)?);

    Ok(())
}
