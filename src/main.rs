fn main() -> anyhow::Result<()> {
    advisordesk::run()?;
    Ok(())
}
