//! One chart instance: initialization, event handling, teardown.
//!
//! Everything runs synchronously on the host's event loop. A discrete
//! trigger (first mount, card click, zoom button, gesture update, resize)
//! mutates tree or viewport state, re-runs layout, and emits scene
//! instructions; nothing here blocks or spawns threads.

use orgchart_core::{ChartConfig, ChartOptions, Error, NodeId, OrgTree, PersonNode, Result, Toggle};
use orgchart_render::RenderOptions;
use orgchart_render::card::compute_card;
use orgchart_render::layout::layout_chart;
use orgchart_render::model::{LayoutExtent, LayoutPoint};
use orgchart_render::reconcile::{Anchor, RenderPlan, RenderedSet, diff};
use orgchart_render::scene::{Scene, SceneOp};
use orgchart_render::viewport::{
    SurfaceSize, Viewport, ViewportTransform, ZoomDirection, initial_transform,
};

/// Pixel box of a resolved mount element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mount {
    pub width: f64,
    pub height: f64,
}

/// What the embedding environment must provide: selector resolution and
/// mount-element styling. Scene-graph drawing goes through
/// [`orgchart_render::scene::Scene`] separately.
pub trait Host {
    /// Resolves the mount selector to a measurable element. `None` means the
    /// selector matches nothing.
    fn resolve_mount(&mut self, selector: &str) -> Option<Mount>;

    /// Re-measures the mount on resize. `None` once the element left the
    /// host tree; listener-driven work must stop then.
    fn measure_mount(&mut self, selector: &str) -> Option<Mount>;

    /// Applies the configured style map and class name to the mount element.
    fn apply_mount_style(&mut self, selector: &str, config: &ChartConfig);
}

/// Fixed-size host for tests and headless embedding.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    pub size: Mount,
    /// Flip to simulate the mount element disappearing.
    pub detached: bool,
    pub styled: Vec<(String, String)>,
}

impl HeadlessHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Mount { width, height },
            detached: false,
            styled: Vec::new(),
        }
    }
}

impl Host for HeadlessHost {
    fn resolve_mount(&mut self, _selector: &str) -> Option<Mount> {
        (!self.detached).then_some(self.size)
    }

    fn measure_mount(&mut self, _selector: &str) -> Option<Mount> {
        (!self.detached).then_some(self.size)
    }

    fn apply_mount_style(&mut self, selector: &str, config: &ChartConfig) {
        for (property, value) in &config.style {
            self.styled
                .push((format!("{selector} {property}"), value.css_text()));
        }
    }
}

type PersonLinkHandler = Box<dyn FnMut(&NodeId, &str)>;

/// A mounted chart. Owns the tree, the viewport and the previously rendered
/// set; every interaction funnels through the methods below.
pub struct Chart<H: Host, S: Scene> {
    config: ChartConfig,
    tree: OrgTree,
    viewport: Viewport,
    rendered: RenderedSet,
    extent: LayoutExtent,
    options: RenderOptions,
    host: H,
    scene: S,
    resize_subscribed: bool,
    torn_down: bool,
    on_person_link_click: Option<PersonLinkHandler>,
}

impl<H: Host, S: Scene> Chart<H, S> {
    /// Builds and mounts a chart: resolves the selector, validates the data,
    /// collapses everything below the root, computes the initial viewport
    /// transform and performs the first layout+render.
    ///
    /// The two configuration failures are non-fatal to the host: they are
    /// logged, nothing is drawn, and no partial state is left behind.
    pub fn init(options: ChartOptions, data: PersonNode, host: H, scene: S) -> Result<Self> {
        Self::init_with_options(options, data, host, scene, RenderOptions::default())
    }

    /// [`Chart::init`] with explicit render options (e.g. a host text
    /// measurer with real font metrics).
    pub fn init_with_options(
        options: ChartOptions,
        data: PersonNode,
        mut host: H,
        mut scene: S,
        render_options: RenderOptions,
    ) -> Result<Self> {
        let config = match options.resolve() {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("org-chart: {err}");
                return Err(err);
            }
        };

        let Some(mount) = host.resolve_mount(&config.id) else {
            let err = Error::RootNotFound {
                selector: config.id.clone(),
            };
            tracing::error!("org-chart: {err}");
            return Err(err);
        };

        let mut tree = OrgTree::from_node(data)?;
        tree.collapse_all_below_root();
        // The root's cards sweep in from mid-viewport on first render.
        tree.root_mut().x0 = 0.0;
        tree.root_mut().y0 = mount.height / 2.0;

        // Prior content at the mount point is cleared before drawing.
        scene.apply(SceneOp::ClearSurface);
        host.apply_mount_style(&config.id, &config);
        scene.apply(SceneOp::SetSurfaceSize {
            width: mount.width,
            height: mount.height,
        });

        let size = SurfaceSize::new(mount.width, mount.height);
        let mut viewport = Viewport::new(size, config.scale_extent);
        viewport.set_transform(initial_transform(
            tree.root().children.len(),
            mount.width,
            config.node_width,
            config.margin.left,
        ));
        scene.apply(SceneOp::SetRootTransform {
            transform: viewport.transform,
            animate_ms: None,
        });

        let resize_subscribed = config.should_resize;
        let mut chart = Self {
            config,
            tree,
            viewport,
            rendered: RenderedSet::default(),
            extent: LayoutExtent::default(),
            options: render_options,
            host,
            scene,
            resize_subscribed,
            torn_down: false,
            on_person_link_click: None,
        };
        chart.render(None);
        Ok(chart)
    }

    /// Registers the handler invoked when a person-link is clicked.
    pub fn on_person_link_click(&mut self, handler: impl FnMut(&NodeId, &str) + 'static) {
        self.on_person_link_click = Some(Box::new(handler));
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    pub fn transform(&self) -> ViewportTransform {
        self.viewport.transform
    }

    /// Latest layout extent, the fit-to-viewport input.
    pub fn extent(&self) -> LayoutExtent {
        self.extent
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Lays out the visible tree, diffs against the previous render, emits
    /// scene instructions and checkpoints positions for the next cycle.
    /// `anchor_id` is the node whose toggle triggered the pass; the root
    /// anchors renders with no specific trigger.
    fn render(&mut self, anchor_id: Option<&NodeId>) {
        let layout = layout_chart(&mut self.tree, &self.config);

        let anchor_node = anchor_id
            .and_then(|id| self.tree.find(id))
            .unwrap_or_else(|| self.tree.root());
        let anchor = Anchor {
            id: anchor_node.id.clone(),
            previous: LayoutPoint::new(anchor_node.x0, anchor_node.y0),
            current: LayoutPoint::new(anchor_node.x, anchor_node.y),
        };

        let plan = diff(&self.rendered, &layout, &anchor);
        tracing::debug!(
            enter = plan.enter.len(),
            update = plan.update.len(),
            exit = plan.exit.len(),
            anchor = %anchor.id,
            "render pass"
        );
        self.emit(&plan);

        self.extent = layout.extent;
        self.rendered = RenderedSet::from_layout(&layout);
        self.tree.stash_positions();
    }

    fn emit(&mut self, plan: &RenderPlan) {
        let duration = self.config.animation_duration_ms;
        let measurer = self.options.text_measurer.clone();

        for t in &plan.enter {
            let Some(node) = self.tree.find(&t.id) else {
                continue;
            };
            let card = compute_card(&node.person, &self.config, measurer.as_ref());
            self.scene.apply(SceneOp::CreateNode {
                id: t.id.clone(),
                at: t.from,
                card: Box::new(card),
            });
            self.scene.apply(SceneOp::TransitionNode {
                id: t.id.clone(),
                from: t.from,
                to: t.to,
                duration_ms: duration,
            });
        }
        for t in &plan.update {
            self.scene.apply(SceneOp::TransitionNode {
                id: t.id.clone(),
                from: t.from,
                to: t.to,
                duration_ms: duration,
            });
        }
        for t in &plan.exit {
            self.scene.apply(SceneOp::RemoveNodeAfter {
                id: t.id.clone(),
                to: t.to,
                duration_ms: duration,
            });
        }

        for l in &plan.link_enter {
            self.scene.apply(SceneOp::CreateLink {
                id: l.id.clone(),
                points: l.from.clone(),
            });
            self.scene.apply(SceneOp::TransitionLink {
                id: l.id.clone(),
                from: l.from.clone(),
                to: l.to.clone(),
                duration_ms: duration,
            });
        }
        for l in &plan.link_update {
            self.scene.apply(SceneOp::TransitionLink {
                id: l.id.clone(),
                from: l.from.clone(),
                to: l.to.clone(),
                duration_ms: duration,
            });
        }
        for l in &plan.link_exit {
            self.scene.apply(SceneOp::RemoveLinkAfter {
                id: l.id.clone(),
                to: l.to.clone(),
                duration_ms: duration,
            });
        }
    }

    /// Card click: toggles the subtree and re-renders with the clicked node
    /// as the transition anchor. Clicking a leaf does nothing.
    pub fn handle_node_click(&mut self, id: &NodeId) -> Result<Toggle> {
        if self.torn_down {
            return Ok(Toggle::Leaf);
        }
        let toggle = self.tree.toggle(id)?;
        if toggle != Toggle::Leaf {
            self.render(Some(id));
        }
        Ok(toggle)
    }

    fn apply_animated_transform(&mut self, transform: ViewportTransform) {
        self.viewport.set_transform(transform);
        self.scene.apply(SceneOp::SetRootTransform {
            transform,
            animate_ms: Some(self.config.animation_duration_ms),
        });
    }

    /// One zoom-in button step. Out-of-range steps are silent no-ops.
    pub fn zoom_in(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(t) = self.viewport.step_zoom(ZoomDirection::In) {
            self.apply_animated_transform(t);
        }
    }

    /// One zoom-out button step. Out-of-range steps are silent no-ops.
    pub fn zoom_out(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(t) = self.viewport.step_zoom(ZoomDirection::Out) {
            self.apply_animated_transform(t);
        }
    }

    /// Fits the whole visible tree into the viewport.
    pub fn zoom_to_fit(&mut self) {
        if self.torn_down {
            return;
        }
        let t = self.viewport.fit_transform(&self.extent, &self.config);
        self.apply_animated_transform(t);
    }

    /// Dispatches an external control-button click by element id, matching
    /// against the configured zoom-in/zoom-out/zoom-extent ids.
    pub fn handle_control_click(&mut self, element_id: &str) {
        if self.config.zoom_in_id.as_deref() == Some(element_id) {
            self.zoom_in();
        } else if self.config.zoom_out_id.as_deref() == Some(element_id) {
            self.zoom_out();
        } else if self.config.zoom_extent_id.as_deref() == Some(element_id) {
            self.zoom_to_fit();
        }
    }

    /// Continuous gesture update from the host's pan/zoom recognizer. The
    /// host clamps the scale to the configured extent before reporting.
    pub fn handle_gesture(&mut self, transform: ViewportTransform) {
        if self.torn_down {
            return;
        }
        self.viewport.set_transform(transform);
        self.scene.apply(SceneOp::SetRootTransform {
            transform,
            animate_ms: None,
        });
    }

    /// Window resize: re-measures the mount and reapplies the surface size.
    /// Does not re-run layout. A detached mount is an immediate no-op and
    /// drops the subscription.
    pub fn handle_resize(&mut self) {
        if self.torn_down || !self.resize_subscribed {
            return;
        }
        let Some(mount) = self.host.measure_mount(&self.config.id) else {
            self.resize_subscribed = false;
            return;
        };
        self.viewport.resize(SurfaceSize::new(mount.width, mount.height));
        self.scene.apply(SceneOp::SetSurfaceSize {
            width: mount.width,
            height: mount.height,
        });
    }

    /// A click on a card's person link. Invokes the registered handler with
    /// the link target, if the person has one.
    pub fn handle_person_link_click(&mut self, id: &NodeId) {
        if self.torn_down {
            return;
        }
        let Some(link) = self
            .tree
            .find(id)
            .and_then(|node| node.person.link.clone())
        else {
            return;
        };
        if let Some(handler) = self.on_person_link_click.as_mut() {
            handler(id, &link);
        }
    }

    /// Releases the chart: unsubscribes resize handling, clears the surface,
    /// and turns every further event into a no-op.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.resize_subscribed = false;
        self.scene.apply(SceneOp::ClearSurface);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
