//! Net routing and drawing.
//!
//! Every connection of a net is drawn as an orthogonal wire between the
//! component's hub-facing edge and the net's hub. The one connection tagged
//! by the layout as closing the loop instead runs around the bottom of the
//! diagram into the voltage source's left terminal.

use log::{debug, trace};
use svg::node::element as svg_element;

use voltaic_core::{
    apply_stroke,
    draw::{StrokeDefinition, Surface},
    geometry::Point,
};

use super::{
    ComponentRenderer, ScaleManager,
    route::{closing_route, manhattan, path_data},
};
use crate::{
    config::RoutingConfig,
    layout::{Layout, PlacedNet},
};

/// How a connection is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Three segments between the component and the hub.
    Ordinary,
    /// Five segments from the hub around the diagram back into the source.
    Closing,
}

/// The wire of one connection, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    net_id: String,
    component_id: String,
    pin: String,
    kind: RouteKind,
    points: Vec<Point>,
}

impl Route {
    pub fn net_id(&self) -> &str {
        &self.net_id
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of straight segments.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Returns the SVG path data for this wire.
    pub fn path_data(&self) -> String {
        path_data(&self.points)
    }
}

/// All wires of one net, plus where its hub is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct NetRoutes {
    net_id: String,
    hub: Point,
    routes: Vec<Route>,
}

impl NetRoutes {
    pub fn net_id(&self) -> &str {
        &self.net_id
    }

    /// Returns the hub position in pixels.
    pub fn hub(&self) -> Point {
        self.hub
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

/// Computes and draws the wires of every net.
#[derive(Debug)]
pub struct NetRouter<'a> {
    scales: &'a ScaleManager,
    components: ComponentRenderer<'a>,
    config: &'a RoutingConfig,
    stroke: &'a StrokeDefinition,
}

impl<'a> NetRouter<'a> {
    pub fn new(
        scales: &'a ScaleManager,
        components: ComponentRenderer<'a>,
        config: &'a RoutingConfig,
        stroke: &'a StrokeDefinition,
    ) -> Self {
        Self {
            scales,
            components,
            config,
            stroke,
        }
    }

    /// Computes the wires of every net that has a hub, in layout order.
    ///
    /// Connections to components the layout did not place are skipped.
    pub fn routes(&self, layout: &Layout) -> Vec<NetRoutes> {
        let half = self.components.size() / 2.0;
        // Pixel row the closing route runs along, below the lowest footprint
        let floor_y = layout
            .lowest_y()
            .map(|y| self.scales.scale_y(y as f32) + half + self.config.clearance());

        layout
            .nets()
            .iter()
            .map(|net| self.net_routes(layout, net, floor_y))
            .collect()
    }

    fn net_routes(&self, layout: &Layout, net: &PlacedNet, floor_y: Option<f32>) -> NetRoutes {
        let hub = self.scales.scale_hub(net.position());
        let mut routes = Vec::with_capacity(net.net().connections().len());

        for connection in net.net().connections() {
            let Some(placed) = layout.component(connection.component()) else {
                debug!(
                    net = net.id(),
                    component = connection.component();
                    "Skipping connection to unplaced component"
                );
                continue;
            };

            let is_closing = layout
                .closing()
                .is_some_and(|closing| closing.is_closing(net.id(), placed.id()));

            let (kind, points) = match floor_y {
                Some(floor_y) if is_closing => {
                    let target = self.components.connection_point(placed, false);
                    let points = closing_route(hub, target, floor_y, self.config.closing_overhang());
                    (RouteKind::Closing, points)
                }
                _ => {
                    let is_source = (placed.position().x() as f32) < net.position().x();
                    let point = self.components.connection_point(placed, is_source);
                    let points = if is_source {
                        manhattan(point, hub, None)
                    } else {
                        manhattan(hub, point, None)
                    };
                    (RouteKind::Ordinary, points)
                }
            };

            trace!(net = net.id(), component = placed.id(), kind:? = kind; "Routed connection");
            routes.push(Route {
                net_id: net.id().to_string(),
                component_id: placed.id().to_string(),
                pin: connection.pin().to_string(),
                kind,
                points,
            });
        }

        NetRoutes {
            net_id: net.id().to_string(),
            hub,
            routes,
        }
    }

    fn render_net(&self, net: &NetRoutes) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "net")
            .set("data-id", net.net_id());

        for route in net.routes() {
            let class = match route.kind() {
                RouteKind::Ordinary => "wire",
                RouteKind::Closing => "wire closing",
            };
            let path = svg_element::Path::new()
                .set("class", class)
                .set("data-component", route.component_id())
                .set("d", route.path_data())
                .set("fill", "none");
            group = group.add(apply_stroke!(path, self.stroke));
        }

        let hub = net.hub();
        let marker = svg_element::Circle::new()
            .set("cx", hub.x())
            .set("cy", hub.y())
            .set("r", self.config.marker_radius())
            .set("fill", &self.stroke.color());

        let label = svg_element::Text::new(net.net_id())
            .set("x", hub.x())
            .set("y", hub.y() - self.config.label_offset())
            .set("text-anchor", "middle");

        group.add(marker).add(label)
    }

    /// Appends a `nets` group with every wire, hub marker and net label.
    ///
    /// Does not clear the surface.
    pub fn render(&self, surface: &mut Surface, layout: &Layout) {
        let routes = self.routes(layout);
        debug!(
            nets = routes.len(),
            wires = routes.iter().map(|net| net.routes().len()).sum::<usize>();
            "Rendering nets"
        );

        let group = routes.iter().fold(
            svg_element::Group::new().set("class", "nets"),
            |group, net| group.add(self.render_net(net)),
        );
        surface.append(group);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::CanvasConfig,
        layout::{ClosingLink, PlacedComponent},
        render::{SymbolMap, is_orthogonal},
    };
    use voltaic_core::{
        geometry::GridPoint,
        netlist::{Component, ComponentKind, Connection, Net},
    };

    fn placed(id: &str, kind: ComponentKind, x: i32, y: i32) -> PlacedComponent {
        PlacedComponent::new(Component::new(id, kind), GridPoint::new(x, y))
    }

    fn connections(pairs: &[(&str, &str)]) -> Vec<Connection> {
        pairs
            .iter()
            .map(|(component, pin)| Connection::new(*component, *pin))
            .collect()
    }

    fn divider_layout() -> Layout {
        Layout::new(
            vec![
                placed("V1", ComponentKind::VoltageSource, 0, 0),
                placed("R1", ComponentKind::Resistor, 1, 0),
                placed("R2", ComponentKind::Resistor, 2, 0),
            ],
            vec![
                PlacedNet::new(
                    Net::new("N1", connections(&[("V1", "+"), ("R1", "a")])),
                    Point::new(0.5, 0.0),
                ),
                PlacedNet::new(
                    Net::new("N2", connections(&[("R1", "b"), ("R2", "a")])),
                    Point::new(1.5, 0.0),
                ),
                PlacedNet::new(
                    Net::new("N3", connections(&[("R2", "b"), ("V1", "-"), ("X1", "a")])),
                    Point::new(2.5, 0.0),
                ),
            ],
        )
        .with_closing(ClosingLink::new("N3", "V1"))
    }

    struct Fixture {
        scales: ScaleManager,
        symbols: SymbolMap,
        config: RoutingConfig,
        stroke: StrokeDefinition,
    }

    impl Fixture {
        fn new(layout: &Layout) -> Self {
            let mut scales = ScaleManager::new(&CanvasConfig::default());
            scales.update_scales_to_circuit(layout);
            Self {
                scales,
                symbols: SymbolMap::default(),
                config: RoutingConfig::default(),
                stroke: StrokeDefinition::default(),
            }
        }

        fn router(&self) -> NetRouter<'_> {
            let components = ComponentRenderer::new(&self.scales, &self.symbols, 80.0);
            NetRouter::new(&self.scales, components, &self.config, &self.stroke)
        }
    }

    #[test]
    fn test_divider_route_kinds() {
        let layout = divider_layout();
        let fixture = Fixture::new(&layout);
        let routes = fixture.router().routes(&layout);

        assert_eq!(routes.len(), 3);
        let summary: Vec<_> = routes
            .iter()
            .flat_map(|net| net.routes())
            .map(|route| (route.net_id(), route.component_id(), route.kind(), route.segment_count()))
            .collect();
        assert_eq!(
            summary,
            [
                ("N1", "V1", RouteKind::Ordinary, 3),
                ("N1", "R1", RouteKind::Ordinary, 3),
                ("N2", "R1", RouteKind::Ordinary, 3),
                ("N2", "R2", RouteKind::Ordinary, 3),
                ("N3", "R2", RouteKind::Ordinary, 3),
                ("N3", "V1", RouteKind::Closing, 5),
            ]
        );
        assert!(
            routes
                .iter()
                .flat_map(|net| net.routes())
                .all(|route| is_orthogonal(route.points()))
        );
    }

    #[test]
    fn test_source_routes_start_at_right_edge() {
        let layout = divider_layout();
        let fixture = Fixture::new(&layout);
        let router = fixture.router();
        let routes = router.routes(&layout);

        let v1 = layout.component("V1").unwrap();
        let center = fixture.scales.scale_point(v1.position());
        let feed = &routes[0].routes()[0];
        assert_approx_eq!(f32, feed.points()[0].x(), center.x() + 40.0);
        assert_eq!(feed.points()[3], routes[0].hub());

        // R1 is fed by N1: the wire starts at the hub and ends on R1's left edge
        let fed = &routes[0].routes()[1];
        assert_eq!(fed.points()[0], routes[0].hub());
        let r1 = fixture.scales.scale_point(GridPoint::new(1, 0));
        assert_approx_eq!(f32, fed.points()[3].x(), r1.x() - 40.0);
    }

    #[test]
    fn test_closing_route_passes_below_lowest_component() {
        let layout = divider_layout();
        let fixture = Fixture::new(&layout);
        let routes = fixture.router().routes(&layout);

        let closing = &routes[2].routes()[1];
        let hub = routes[2].hub();
        let floor = fixture.scales.scale_y(0.0) + 40.0 + 50.0;
        let v1 = fixture.scales.scale_point(GridPoint::new(0, 0));

        assert_eq!(closing.points()[0], hub);
        assert_approx_eq!(f32, closing.points()[1].x(), hub.x() + 50.0);
        assert_approx_eq!(f32, closing.points()[2].y(), floor);
        assert_approx_eq!(f32, closing.points()[3].y(), floor);
        assert_approx_eq!(f32, closing.points()[3].x(), v1.x() - 40.0 - 50.0);
        assert_approx_eq!(f32, closing.points()[5].x(), v1.x() - 40.0);
        assert_approx_eq!(f32, closing.points()[5].y(), v1.y());
    }

    #[test]
    fn test_unresolved_components_are_skipped() {
        let layout = divider_layout();
        let fixture = Fixture::new(&layout);
        let routes = fixture.router().routes(&layout);

        assert_eq!(routes[2].routes().len(), 2);
        assert!(routes[2].routes().iter().all(|route| route.component_id() != "X1"));
    }

    #[test]
    fn test_without_closing_tag_every_route_is_ordinary() {
        let layout = Layout::new(divider_layout().components().to_vec(), divider_layout().nets().to_vec());
        let fixture = Fixture::new(&layout);
        let routes = fixture.router().routes(&layout);

        assert!(
            routes
                .iter()
                .flat_map(|net| net.routes())
                .all(|route| route.kind() == RouteKind::Ordinary)
        );
    }

    #[test]
    fn test_render_markup() {
        let layout = divider_layout();
        let fixture = Fixture::new(&layout);
        let mut surface = Surface::new();
        fixture.router().render(&mut surface, &layout);

        assert_eq!(surface.len(), 1);
        let markup = surface.to_markup();
        assert!(markup.starts_with("<g class=\"nets\">"));
        assert_eq!(markup.matches("<circle").count(), 3);
        assert_eq!(markup.matches("class=\"wire\"").count(), 5);
        assert_eq!(markup.matches("class=\"wire closing\"").count(), 1);
        assert!(markup.contains("stroke=\"black\""));
        assert!(markup.contains("r=\"4\""));
        assert!(markup.contains(">N3<"));
    }
}
