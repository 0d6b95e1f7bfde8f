use warsim::scenario::Scenario;

/// Aundair and Thrane, one settlement each: Aundair's Tellyn and Thrane's Olath.
pub fn two_kingdoms() -> Scenario {
    let mut s = Scenario::new();
    s.actor("Aundair");
    s.actor("Thrane");
    s.settlement("Tellyn", "Aundair");
    s.settlement("Olath", "Thrane");
    s
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
