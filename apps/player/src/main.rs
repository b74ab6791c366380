fn main() -> anyhow::Result<()> {
    unit_player::run()
}
