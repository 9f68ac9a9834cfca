use serde::Serialize;

use crate::db::models::user::{Profile, User};
use crate::serializers::LinkContext;

#[derive(Serialize, Debug)]
pub struct UserLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub tasks: String,
}

#[derive(Serialize, Debug)]
pub struct ProfileBody {
    pub first_name: String,
    pub last_name: String,
    pub address_first: String,
    pub address_second: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Serialize, Debug)]
pub struct UserBody {
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub profile: ProfileBody,
    pub links: UserLinks,
}

pub fn user_body(user: &User, profile: &Profile, links: &LinkContext) -> UserBody {
    UserBody {
        username: user.username.clone(),
        full_name: user.full_name(),
        is_active: user.is_active,
        profile: ProfileBody {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            address_first: profile.address_first.clone(),
            address_second: profile.address_second.clone(),
            city: profile.city.clone(),
            state: profile.state.clone(),
            zip: profile.zip.clone(),
            country: profile.country.clone(),
        },
        links: UserLinks {
            self_link: links.user_url(&user.username),
            tasks: links.user_tasks_url(&user.username),
        },
    }
}
