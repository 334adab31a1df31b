fn main() -> anyhow::Result<()> {
    varscope_cli::run()
}
