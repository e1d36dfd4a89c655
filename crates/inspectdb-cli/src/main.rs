fn main() -> anyhow::Result<()> {
    env_logger::init();
    inspectdb_cli::parse_and_run()
}
