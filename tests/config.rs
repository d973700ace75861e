//! Environment configuration. Kept to one test so no other test races on the variables.

use tournament_history_viewer::{ManualRankPolicy, ViewerConfig};

#[test]
fn environment_overrides_and_out_of_range_values() {
    std::env::set_var("PORT", "9090");
    std::env::set_var("MANUAL_RANK_POLICY", "show");
    std::env::set_var("MIN_BRACKET_SIZE", "5000000000");
    let config = ViewerConfig::from_env();
    assert_eq!(config.port, 9090);
    assert_eq!(config.view.manual_rank_policy, ManualRankPolicy::AlwaysShow);
    // Not a u32 at all: ignored, default kept.
    assert_eq!(config.view.min_bracket_size, 8);

    std::env::set_var("MIN_BRACKET_SIZE", "4096");
    assert_eq!(ViewerConfig::from_env().view.min_bracket_size, 1024);

    std::env::set_var("MIN_BRACKET_SIZE", "1");
    assert_eq!(ViewerConfig::from_env().view.min_bracket_size, 2);

    std::env::set_var("MIN_BRACKET_SIZE", "16");
    assert_eq!(ViewerConfig::from_env().view.min_bracket_size, 16);

    for key in ["PORT", "MANUAL_RANK_POLICY", "MIN_BRACKET_SIZE"] {
        std::env::remove_var(key);
    }
}
