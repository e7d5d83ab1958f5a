fn main() -> anyhow::Result<()> {
    gyre_demos::run(gyre_demos::scenes::spinning_box())
}
