#[cfg(test)]
mod tests {
    use std::path::Path;

    use itertools::Itertools;
    use test_case::test_case;

    use gcl::config::GclConfig;
    use gcl::gcl_solver::GclSolver;
    use gcl::io;
    use guillo_rs::allocation::UnplacedReason;
    use guillo_rs::entities::Cut;
    use guillo_rs::io::export::export_allocation;
    use guillo_rs::io::ext_repr::ExtResponse;
    use guillo_rs::io::import::import_request;
    use guillo_rs::io::svg::container_to_svg;
    use guillo_rs::util::assertions;

    #[test_case("../assets/quadrants.json"; "quadrants")]
    #[test_case("../assets/kitchen.json"; "kitchen")]
    #[test_case("../assets/strips.json"; "strips")]
    #[test_case("../assets/mixed.json"; "mixed")]
    fn test_instance(instance_path: &str) {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = GclConfig::default();

        let ext_request = io::read_request(Path::new(instance_path)).unwrap();
        let request = import_request(&ext_request).unwrap();
        let allocation = GclSolver::new(config.cut_config).solve(&request).unwrap();

        assert!(assertions::ids_conserved(
            request.pieces.iter().map(|p| p.id),
            allocation.placed_ids().chain(allocation.unplaced_ids())
        ));
        for container in &allocation.containers {
            assert!(assertions::container_is_consistent(container));
            assert!(assertions::cut_log_respects_gap(
                &container.cut_log,
                config.cut_config.max_gap
            ));
            let svg = container_to_svg(container, config.svg_draw_options, instance_path);
            assert!(svg.to_string().contains(&format!("container_{}", container.index)));
        }

        //the response survives a json roundtrip
        let response = export_allocation(&allocation);
        let json = serde_json::to_string(&response).unwrap();
        let parsed: ExtResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.bins.len(), allocation.containers.len());
        assert_eq!(parsed.unplaced_count, allocation.unplaced.len());
    }

    #[test]
    fn quadrants_fit_a_single_bin() {
        let ext_request = io::read_request(Path::new("../assets/quadrants.json")).unwrap();
        let request = import_request(&ext_request).unwrap();
        let allocation = GclSolver::new(GclConfig::default().cut_config)
            .solve(&request)
            .unwrap();
        let response = export_allocation(&allocation);

        assert_eq!(response.bins.len(), 1);
        assert_eq!(response.unplaced_count, 0);
        assert!(!response.bins[0].has_waste);
        assert_eq!(
            response.bins[0].cuts,
            vec![Cut::horizontal(50), Cut::vertical(50), Cut::vertical(50)]
        );
    }

    #[test]
    fn oversized_panel_is_reported() {
        let ext_request = io::read_request(Path::new("../assets/kitchen.json")).unwrap();
        let request = import_request(&ext_request).unwrap();
        let oversized = request.pieces.iter().map(|p| p.id).max().unwrap();
        let allocation = GclSolver::new(GclConfig::default().cut_config)
            .solve(&request)
            .unwrap();

        let unplaced = allocation
            .unplaced
            .iter()
            .map(|u| (u.piece.id, u.reason))
            .collect_vec();
        assert_eq!(unplaced, vec![(oversized, UnplacedReason::Infeasible)]);
    }

    #[test]
    fn partial_config_file_uses_defaults() {
        let json = r#"{
            "cut_config": {"max_gap": 400, "max_bins_hint": 10, "allow_rotation": false},
            "write_svg": false
        }"#;
        let config: GclConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.cut_config.max_gap, 400);
        assert!(!config.cut_config.allow_rotation);
        assert_eq!(config.cut_config.max_rounds, None);
        assert!(!config.write_svg);
        assert_eq!(config.svg_draw_options, GclConfig::default().svg_draw_options);
    }

    #[test]
    fn missing_request_file_is_an_error() {
        assert!(io::read_request(Path::new("../assets/does_not_exist.json")).is_err());
    }
}
