fn main() -> anyhow::Result<()> {
    gyre_demos::run(gyre_demos::scenes::hexagon())
}
