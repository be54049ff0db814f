//! Turns the live scene into draw instructions.
//!
//! Each frame the engine reads plain data off a `Scene` (door offset, figure
//! positions, which view is showing) and resolves it into `DrawOp`s on a
//! terminal-sized grid. It never changes the scene and never touches the
//! terminal.

pub mod projection;
pub mod sprites;

use crate::scene::Scene;
use crate::schedule::View;
use crate::types::{ResolvedScene, TerminalContract};
use projection::Projection;
use sprites::{EXTERIOR, INTERIOR, Paint};

pub struct Engine;

impl Engine {
    /// Resolve the current state of `scene` onto a grid of `contract` cells.
    pub fn resolve(scene: &Scene, contract: TerminalContract) -> ResolvedScene {
        let proj = Projection::new(scene.canvas(), contract);
        let layers = match Self::visible_view(scene) {
            View::Exterior => EXTERIOR,
            View::Interior => INTERIOR,
        };

        let mut ops = Vec::new();
        for layer in layers {
            layer.paint(scene, &proj, &mut ops);
        }

        ResolvedScene {
            width: contract.width,
            height: contract.height,
            ops,
        }
    }

    /// The view on screen. A cross-fade can't be drawn in cells, so the
    /// target view takes over halfway through a transition.
    pub fn visible_view(scene: &Scene) -> View {
        let director = scene.director();
        match director.transition() {
            Some(t) if t.progress >= 0.5 => t.target,
            _ => director.view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneTuning;
    use crate::renderer::Renderer;
    use crate::types::Grid;

    const CONTRACT: TerminalContract = TerminalContract {
        width: 90,
        height: 30,
    };

    fn render(scene: &Scene) -> Grid {
        Renderer::rasterize(&Engine::resolve(scene, CONTRACT))
    }

    fn count(grid: &Grid, ch: char) -> usize {
        grid.iter().flatten().filter(|c| c.ch == ch).count()
    }

    #[test]
    fn exterior_shows_closed_door_and_no_figures() {
        let scene = Scene::new(&SceneTuning::default(), View::Exterior);
        let grid = render(&scene);
        assert_eq!(grid.len(), 30);
        assert_eq!(grid[0].len(), 90);
        // Resting offscreen: nobody is drawn.
        assert_eq!(count(&grid, 'o'), 0);
        assert!(count(&grid, '║') > 0);
        assert!(count(&grid, '/') > 0);
    }

    #[test]
    fn walking_figures_are_drawn() {
        let mut scene = Scene::new(&SceneTuning::default(), View::Exterior);
        scene.toggle();
        for _ in 0..100 {
            scene.step();
        }
        let grid = render(&scene);
        assert_eq!(count(&grid, 'o'), 2);
        assert_eq!(count(&grid, 'Å'), 2);
    }

    #[test]
    fn open_door_reveals_the_glow() {
        let mut scene = Scene::new(&SceneTuning::default(), View::Exterior);
        let closed = render(&scene);
        scene.toggle();
        while !scene.door().is_open() {
            scene.step();
        }
        let open = render(&scene);
        assert!(count(&open, '╳') < count(&closed, '╳'));
    }

    #[test]
    fn interior_view_draws_the_office() {
        let scene = Scene::new(&SceneTuning::default(), View::Interior);
        let grid = render(&scene);
        assert!(count(&grid, '▤') > 0);
        assert_eq!(count(&grid, 'Å'), 2);
        let text: String = grid
            .iter()
            .map(|r| r.iter().map(|c| c.ch).collect::<String>())
            .collect();
        assert!(text.contains("plan"));
        assert!(grid.iter().flatten().any(|c| c.ch == 'p' && c.style.bold));
    }
}
