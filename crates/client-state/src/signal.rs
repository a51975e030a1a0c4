use crate::records::ChatMessage;

use p2pong_identity::Identity;

use serde::{Deserialize, Serialize};
use specta::Type;

/// Application signals pushed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
#[serde(tag = "type")]
pub enum Signal {
	GameInvitation {
		#[specta(type = String)]
		game_id: Identity,
		#[specta(type = String)]
		inviter: Identity,
		message: String,
	},
	GameStarted {
		#[specta(type = String)]
		game_id: Identity,
		#[specta(type = String)]
		player_1: Identity,
		#[specta(type = String)]
		player_2: Identity,
	},
	PaddleUpdate {
		#[specta(type = String)]
		game_id: Identity,
		#[specta(type = String)]
		player: Identity,
		relative_paddle_y: f32,
	},
	BallUpdate {
		#[specta(type = String)]
		game_id: Identity,
		relative_ball_x: f32,
		relative_ball_y: f32,
		ball_dx: i32,
		ball_dy: i32,
	},
	ScoreUpdate {
		#[specta(type = String)]
		game_id: Identity,
		score1: u32,
		score2: u32,
	},
	GameOver {
		#[specta(type = String)]
		game_id: Identity,
		#[specta(type = Option<String>)]
		winner: Option<Identity>,
		score1: u32,
		score2: u32,
	},
	GlobalChatMessage(ChatMessage),
}

/// What ingesting a [`Signal`] did to the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
	ChatAppended,
	InvitationAdded,
	DuplicateInvitation,
	/// A game started for which an invitation was pending, the invitation is gone
	InvitationSettled,
	/// Gameplay traffic, not held by this layer
	Ignored,
}
