#[cfg(test)]
mod buffer_update_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crossbeam_channel::Receiver;
    use tilebuffer::{
        layers::tile::expand, Bounds, BoundsPolicy, Buffered, LatLng, Point, TemplateSource,
        TileBounds, TileCoord, TileLayer, TileLayerOptions, TileLoader, TileRequest, Viewport,
    };

    fn layer(options: TileLayerOptions) -> (TileLayer, Receiver<TileRequest>) {
        let (loader, rx) = TileLoader::channel();
        let source = Box::new(TemplateSource::openstreetmap().with_options(&options));
        (TileLayer::new("osm", source, options, loader), rx)
    }

    /// Zoom 3, 1000x1000 on the world center: pixels 524..1524, tiles (2,2)..(5,5)
    fn scenario_view() -> Viewport {
        Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(1000.0, 1000.0))
    }

    /// Zoom 10, 500x500 on the world center: tiles (511,511)..(512,512)
    fn deep_view() -> Viewport {
        Viewport::new(LatLng::new(0.0, 0.0), 10.0, Point::new(500.0, 500.0))
    }

    fn counting_policy(margin: i64) -> (impl BoundsPolicy, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let policy = move |bounds: TileBounds, _zoom: u8| {
            counter.fetch_add(1, Ordering::SeqCst);
            bounds.expanded(margin)
        };
        (policy, calls)
    }

    #[test]
    fn test_scenario_buffer_eight() {
        let visible = Bounds::from_coords(524.0, 524.0, 1524.0, 1524.0).to_tile_bounds(256);
        assert_eq!(visible, TileBounds::from_coords(2, 2, 5, 5));

        let buffered = Buffered::new(8).apply(visible, 3);
        assert_eq!(buffered, TileBounds::from_coords(-6, -6, 13, 13));
    }

    #[test]
    fn test_layer_scenario_buffer_eight() {
        let options = TileLayerOptions {
            buffer: Some(8),
            no_wrap: true,
            ..Default::default()
        };
        let (mut layer, rx) = layer(options);
        let update = layer.update(&scenario_view()).unwrap();

        assert_eq!(update.visible, Some(TileBounds::from_coords(2, 2, 5, 5)));
        assert_eq!(update.working, Some(TileBounds::from_coords(-6, -6, 13, 13)));
        assert!(update.buffered);
        // Out-of-world indices never reach the loader: the 8x8 world at zoom 3
        assert_eq!(update.added.len(), 64);
        let requests: Vec<_> = rx.try_iter().collect();
        assert_eq!(requests.len(), 64);
        assert!(requests.iter().all(|r| r.coord().is_valid()));
    }

    #[test]
    fn test_buffer_zero_is_identity() {
        let visible = TileBounds::from_coords(2, 2, 5, 5);
        assert_eq!(expand(visible, Some(0)), visible);

        let options = TileLayerOptions {
            buffer: Some(0),
            ..Default::default()
        };
        let (mut layer, _rx) = layer(options);
        let update = layer.update(&scenario_view()).unwrap();
        assert_eq!(update.working, update.visible);
        assert!(!update.buffered);
        assert_eq!(update.added.len(), 16);
    }

    #[test]
    fn test_buffer_absent_is_identity() {
        let options = TileLayerOptions::from_json_str(r#"{ "subdomains": ["a"] }"#).unwrap();
        assert_eq!(options.buffer, None);

        let (mut layer, _rx) = layer(options);
        let update = layer.update(&scenario_view()).unwrap();
        assert_eq!(update.working, Some(TileBounds::from_coords(2, 2, 5, 5)));
        assert!(!update.buffered);
    }

    #[test]
    fn test_zoom_out_of_range_never_calls_policy() {
        let options = TileLayerOptions {
            max_zoom: 2,
            ..Default::default()
        };
        let (policy, calls) = counting_policy(8);
        let (layer, rx) = layer(options);
        let mut layer = layer.with_policy(policy);

        let update = layer.update(&scenario_view()).unwrap();
        assert!(update.is_skipped());
        assert!(update.visible.is_none() && update.working.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_policy_applied_once_per_update() {
        let (policy, calls) = counting_policy(3);
        let (layer, _rx) = layer(TileLayerOptions::default());
        let mut layer = layer.with_policy(policy);

        let first = layer.update(&deep_view()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let visible = first.visible.unwrap();
        assert_eq!(first.working, Some(visible.expanded(3)));

        let second = layer.update(&deep_view()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.working, first.working);
        assert!(second.added.is_empty());
    }

    #[test]
    fn test_buffered_tiles_survive_pruning() {
        let options = TileLayerOptions {
            buffer: Some(2),
            unload_invisible_tiles: true,
            ..Default::default()
        };
        let (mut layer, _rx) = layer(options);

        let first = layer.update(&deep_view()).unwrap();
        assert_eq!(first.visible, Some(TileBounds::from_coords(511, 511, 512, 512)));
        assert_eq!(first.added.len(), 36);
        assert!(first.removed.is_empty(), "buffered tiles evicted by their own update");

        let mut viewport = deep_view();
        viewport.pan_by(Point::new(256.0, 0.0));
        let second = layer.update(&viewport).unwrap();

        assert_eq!(second.working, Some(TileBounds::from_coords(510, 509, 515, 514)));
        assert_eq!(second.added.len(), 6);
        assert!(second.added.iter().all(|c| c.x == 515));
        assert_eq!(second.removed.len(), 6);
        assert!(second.removed.iter().all(|c| c.x == 509));
        assert_eq!(layer.tile_count(), 36);
    }

    #[test]
    fn test_without_pruning_tiles_accumulate() {
        let options = TileLayerOptions {
            buffer: Some(1),
            ..Default::default()
        };
        let (mut layer, _rx) = layer(options);
        layer.update(&deep_view()).unwrap();

        let mut viewport = deep_view();
        viewport.pan_by(Point::new(512.0, 0.0));
        let update = layer.update(&viewport).unwrap();

        assert!(update.removed.is_empty());
        assert_eq!(layer.tile_count(), 16 + 8);
    }

    #[test]
    fn test_set_buffer_at_runtime() {
        let (mut layer, _rx) = layer(TileLayerOptions::default());
        assert_eq!(layer.update(&deep_view()).unwrap().added.len(), 4);

        layer.set_buffer(Some(1));
        let update = layer.update(&deep_view()).unwrap();
        assert!(update.buffered);
        assert_eq!(update.added.len(), 16 - 4);
        assert_eq!(layer.options().buffer, Some(1));
    }

    #[test]
    fn test_center_out_loading_order() {
        let options = TileLayerOptions {
            buffer: Some(1),
            ..Default::default()
        };
        let (mut layer, rx) = layer(options);
        let update = layer.update(&deep_view()).unwrap();

        let center = update.working.unwrap().center();
        let distances: Vec<f64> = update
            .added
            .iter()
            .map(|c| {
                let dx = c.x as f64 - center.x;
                let dy = c.y as f64 - center.y;
                dx * dx + dy * dy
            })
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        // The loader sees the same order
        let queued: Vec<TileCoord> = rx.try_iter().map(|r| r.coord()).collect();
        assert_eq!(queued, update.added);
    }
}
