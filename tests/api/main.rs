mod health_check;
mod helpers;
mod subscribe_page;
