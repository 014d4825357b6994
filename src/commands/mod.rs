use stratus_core::{
    config::{sync::Strategy, Config},
    transfer::Transfer,
};

pub mod sync;

pub fn config(config: &Config) -> eyre::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub async fn version(transfer: &Transfer) -> eyre::Result<()> {
    if let Some(version) = stratus_core::VERSION {
        println!("stratus: {}", version);
    } else {
        println!("stratus: [untagged build]")
    }

    for (tool, strategy) in [("cp", Strategy::Copy), ("rsync", Strategy::Mirror)] {
        match transfer.version_string(strategy).await {
            Ok(tool_version) => println!("{}: {}", tool, tool_version),
            Err(err) => println!(
                "Could not determine {} version ({}), is it installed correctly?",
                tool, err
            ),
        }
    }
    Ok(())
}
