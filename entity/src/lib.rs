pub mod user;
pub mod auth_token;
pub mod hospital;

/*
 A user owns any number of hospitals and at most one auth token.
 Removing the user removes both: the FKs cascade and DbService::delete_user
 also deletes them explicitly inside one transaction.
 */
