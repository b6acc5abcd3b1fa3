// Actor that records engine events so tests can assert on delivery order
// without a real socket.

use actix::prelude::*;
use actix::WeakRecipient;
use bingo_backend::ws::events::{AdminEvent, PlayerEvent};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub struct EventCollector {
    admin_tx: UnboundedSender<AdminEvent>,
    player_tx: UnboundedSender<PlayerEvent>,
}

pub struct CollectorHandle {
    pub addr: Addr<EventCollector>,
    pub admin_rx: UnboundedReceiver<AdminEvent>,
    pub player_rx: UnboundedReceiver<PlayerEvent>,
}

impl CollectorHandle {
    pub fn admin_recipient(&self) -> WeakRecipient<AdminEvent> {
        self.addr.clone().recipient::<AdminEvent>().downgrade()
    }

    pub fn player_recipient(&self) -> WeakRecipient<PlayerEvent> {
        self.addr.clone().recipient::<PlayerEvent>().downgrade()
    }

    pub async fn next_admin(&mut self) -> AdminEvent {
        tokio::time::timeout(std::time::Duration::from_secs(2), self.admin_rx.recv())
            .await
            .expect("timed out waiting for admin event")
            .expect("collector dropped")
    }

    pub async fn next_player(&mut self) -> PlayerEvent {
        tokio::time::timeout(std::time::Duration::from_secs(2), self.player_rx.recv())
            .await
            .expect("timed out waiting for player event")
            .expect("collector dropped")
    }
}

/// Must be called from within an actix system (e.g. `#[actix_web::test]`).
pub fn start_collector() -> CollectorHandle {
    let (admin_tx, admin_rx) = unbounded_channel();
    let (player_tx, player_rx) = unbounded_channel();
    let addr = EventCollector {
        admin_tx,
        player_tx,
    }
    .start();
    CollectorHandle {
        addr,
        admin_rx,
        player_rx,
    }
}

impl Actor for EventCollector {
    type Context = Context<Self>;
}

impl Handler<AdminEvent> for EventCollector {
    type Result = ();

    fn handle(&mut self, msg: AdminEvent, _ctx: &mut Self::Context) {
        let _ = self.admin_tx.send(msg);
    }
}

impl Handler<PlayerEvent> for EventCollector {
    type Result = ();

    fn handle(&mut self, msg: PlayerEvent, _ctx: &mut Self::Context) {
        let _ = self.player_tx.send(msg);
    }
}
